//! Macros for declaring per-entity option types.
//!
//! An option type is a newtype over a generic builder that implements the
//! matching options trait, leaving the type free to carry named sugar
//! methods in its own `impl` block.

/// Declares an include option type over an entity.
///
/// # Syntax
///
/// ```ignore
/// include_options!(
///     /// Includes reachable from a customer.
///     pub struct CustomerIncludes(Customer);
/// );
///
/// impl CustomerIncludes {
///     pub fn billing_address(self) -> Result<Self> {
///         self.add_include(customers::BILLING_ADDRESS)
///     }
/// }
/// ```
#[macro_export]
macro_rules! include_options {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($entity:ty);) => {
        $(#[$meta])*
        $vis struct $name($crate::IncludeBuilder<$entity>);

        impl $crate::IncludeOptions for $name {
            type Entity = $entity;

            fn from_builder(builder: $crate::IncludeBuilder<$entity>) -> Self {
                Self(builder)
            }

            fn builder(&self) -> &$crate::IncludeBuilder<$entity> {
                &self.0
            }

            fn into_builder(self) -> $crate::IncludeBuilder<$entity> {
                self.0
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
}

/// Declares a filter option type over an entity, generic over the query
/// engine, that hands off to the given include option type.
///
/// # Syntax
///
/// ```ignore
/// filter_options!(
///     pub struct CustomerFilters(Customer) => CustomerIncludes;
/// );
/// ```
#[macro_export]
macro_rules! filter_options {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($entity:ty) => $includes:ty;) => {
        $(#[$meta])*
        $vis struct $name<Q>($crate::FilterBuilder<$entity, Q>);

        impl<Q: $crate::fluent_db::QueryEngine> $crate::FilterOptions for $name<Q> {
            type Entity = $entity;
            type Engine = Q;
            type Includes = $includes;

            fn from_builder(builder: $crate::FilterBuilder<$entity, Q>) -> Self {
                Self(builder)
            }

            fn builder(&self) -> &$crate::FilterBuilder<$entity, Q> {
                &self.0
            }

            fn into_builder(self) -> $crate::FilterBuilder<$entity, Q> {
                self.0
            }
        }

        impl<Q> ::std::fmt::Debug for $name<Q> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
}
