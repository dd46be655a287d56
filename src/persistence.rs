//! Persistence capability of a record.

use crate::step::short_type_name;

/// A record that can be saved.
///
/// Implemented by the domain type a use case produces. The engine only needs
/// to know whether the save went through and, if not, why.
///
/// ```
/// use casework::Persist;
///
/// struct BlogPost {
///     title: String,
///     persisted: bool,
/// }
///
/// impl Persist for BlogPost {
///     fn save(&mut self) -> bool {
///         self.persisted = !self.title.is_empty();
///         self.persisted
///     }
///
///     fn errors(&self) -> Vec<String> {
///         if self.title.is_empty() {
///             vec!["Title can't be blank".to_string()]
///         } else {
///             Vec::new()
///         }
///     }
/// }
///
/// let post = BlogPost { title: String::new(), persisted: false };
/// assert_eq!(post.model_name(), "blog_post");
/// ```
pub trait Persist {
    /// Attempts to save. Returns `true` on success.
    fn save(&mut self) -> bool;

    /// Messages explaining the last rejected save.
    fn errors(&self) -> Vec<String>;

    /// Key used when a rejected save is reported as a validation error.
    fn model_name(&self) -> String {
        snake_case(short_type_name::<Self>())
    }
}

impl<P: Persist + ?Sized> Persist for Box<P> {
    fn save(&mut self) -> bool {
        (**self).save()
    }

    fn errors(&self) -> Vec<String> {
        (**self).errors()
    }

    fn model_name(&self) -> String {
        (**self).model_name()
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if previous_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            previous_lower = false;
        } else {
            out.push(c);
            previous_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}
