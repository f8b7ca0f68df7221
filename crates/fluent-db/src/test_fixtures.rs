use crate::define_entity;

#[derive(Debug, Clone)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub pages: i64,
    pub isbn: Option<String>,
}

impl Book {
    pub fn new(id: i64, title: &str, pages: i64, isbn: Option<&str>) -> Self {
        Self {
            id,
            title: title.to_string(),
            pages,
            isbn: isbn.map(String::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub stars: i32,
}

define_entity!(
    Book => books {
        table: "books",
        columns: {
            ID(id): i64 => "id",
            TITLE(title): String => "title",
            PAGES(pages): i64 => "pages",
            ISBN(isbn): Option<String> => "isbn"
        },
        navigations: {
            AUTHOR: Author => "Author",
            REVIEWS: [Review] => "Reviews"
        }
    }
);

define_entity!(
    Author => authors {
        table: "authors",
        columns: {
            ID(id): i64 => "id",
            NAME(name): String => "name"
        },
        navigations: {
            PUBLISHER: Publisher => "Publisher"
        }
    }
);

define_entity!(
    Publisher => publishers {
        table: "publishers",
        columns: {
            ID(id): i64 => "id",
            NAME(name): String => "name"
        },
        navigations: {}
    }
);

define_entity!(
    Review => reviews {
        table: "reviews",
        columns: {
            ID(id): i64 => "id",
            STARS(stars): i32 => "stars"
        },
        navigations: {}
    }
);
