//! Creates a blog post through a use case and prints each outcome.
//!
//! ```sh
//! CASEWORK_LOG=casework=debug cargo run --example create_post
//! ```

use casework::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize)]
struct Post {
    title: String,
    body: String,
    author: String,
    persisted: bool,
}

impl Persist for Post {
    fn save(&mut self) -> bool {
        self.persisted = self.body.len() >= 10;
        self.persisted
    }

    fn errors(&self) -> Vec<String> {
        if self.persisted {
            Vec::new()
        } else {
            vec!["Body is too short (minimum is 10 characters)".to_string()]
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatePost {
    title: Option<String>,
    body: Option<String>,
    author: Option<String>,
    #[serde(default)]
    banned: bool,
}

impl Validate for CreatePost {
    fn validate(&self, errors: &mut Errors) {
        errors.require_present("title", self.title.as_deref());
        errors.require_present("body", self.body.as_deref());
        errors.require_present("author", self.author.as_deref());
    }
}

define_use_case!(CreatePost, record = Post, |p| p
    .mix_in(RecordPersistence)
    .failure_code("access_denied", |o| o
        .message("Banned authors cannot post")
        .when(|ctx| ctx.banned))
    .step("build_post")
    .step("save!")
    .method("build_post", |ctx| {
        let post = Post {
            title: ctx.title.clone().unwrap_or_default(),
            body: ctx.body.clone().unwrap_or_default(),
            author: ctx.author.clone().unwrap_or_default(),
            persisted: false,
        };
        ctx.set_record(post);
        Ok(true)
    })
    .build());

fn main() -> Result<(), Box<dyn std::error::Error>> {
    casework::logging::init();

    let attempts = [
        json!({ "title": "Hello", "body": "A first post, long enough.", "author": "ada" }),
        json!({ "title": "Hello", "body": "A first post, long enough." }),
        json!({ "title": "Hi", "body": "Too short", "author": "ada" }),
        json!({ "title": "Hi", "body": "Never built", "author": "mallory", "banned": true }),
    ];

    for params in attempts {
        let outcome = CreatePost::call(params)?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
