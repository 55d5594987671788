//! Project-specific utilities live here.

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("libris::{module}")
}

#[cfg(test)]
mod tests {
    #[test]
    fn prefix_names_the_module() {
        assert_eq!(super::log_prefix("books"), "libris::books");
    }
}
