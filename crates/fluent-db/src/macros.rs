//! Macros for defining entity schemas.
//!
//! The [`define_entity!`] macro implements [`crate::Entity`] for a struct and
//! generates a module of typed column and navigation constants for it.

/// Declares an entity: its table, typed columns and typed navigations.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     User => users {
///         table: "users",
///         columns: {
///             ID(id): i64 => "id",
///             NAME(name): String => "name"
///         },
///         navigations: {
///             PROFILE: Profile => "Profile",
///             POSTS: [Post] => "Posts"
///         }
///     }
/// );
/// ```
///
/// This expands to:
///
/// ```ignore
/// pub mod users {
///     pub const TABLE: &str = "users";
///     pub const ID: fluent_db::Col<User, i64> = fluent_db::Col::new("id");
///     pub const NAME: fluent_db::Col<User, String> = fluent_db::Col::new("name");
///     pub const PROFILE: fluent_db::Nav<User, Profile> = fluent_db::Nav::new("Profile");
///     pub const POSTS: fluent_db::Nav<User, Post> = fluent_db::Nav::many("Posts");
/// }
///
/// impl fluent_db::Entity for User { /* TABLE, NAME, value() reading id and name */ }
/// ```
///
/// Every column field must be `Clone` and convert into [`crate::Value`].
/// A bracketed navigation target marks a collection navigation.
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident => $module:ident {
            table: $table:literal,
            columns: {
                $($col_name:ident($field:ident): $col_type:ty => $db_col:literal),* $(,)?
            },
            navigations: {
                $($nav_name:ident: $nav_target:tt => $nav_label:literal),* $(,)?
            } $(,)?
        }
    ) => {
        #[allow(dead_code)]
        pub mod $module {
            #[allow(unused_imports)]
            use super::*;

            pub const TABLE: &str = $table;

            $(
                pub const $col_name: $crate::expr::Col<$entity, $col_type> =
                    $crate::expr::Col::new($db_col);
            )*

            $(
                $crate::define_navigation!($entity, $nav_name, $nav_target, $nav_label);
            )*
        }

        impl $crate::Entity for $entity {
            const TABLE: &'static str = $table;
            const NAME: &'static str = stringify!($entity);

            fn value(&self, column: &str) -> $crate::Value {
                match column {
                    $($db_col => $crate::Value::from(::std::clone::Clone::clone(&self.$field)),)*
                    _ => $crate::Value::Null,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! define_navigation {
    // Collection navigation - [T]
    ($entity:ident, $name:ident, [$target:ty], $label:literal) => {
        pub const $name: $crate::expr::Nav<$entity, $target> = $crate::expr::Nav::many($label);
    };

    // Single navigation
    ($entity:ident, $name:ident, $target:ty, $label:literal) => {
        pub const $name: $crate::expr::Nav<$entity, $target> = $crate::expr::Nav::new($label);
    };
}
