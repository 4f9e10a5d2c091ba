pub mod chunk;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;

#[cfg(test)]
mod tests {
    use super::model::chunk_id;

    #[test]
    fn chunk_ids_are_deterministic_and_position_sensitive() {
        let a = chunk_id("notes/intro.txt", 0);
        assert_eq!(a, chunk_id("notes/intro.txt", 0));
        assert_eq!(a.len(), 16);
        assert_ne!(a, chunk_id("notes/intro.txt", 42));
        assert_ne!(a, chunk_id("notes/other.txt", 0));
    }
}
