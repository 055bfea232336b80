use uuid::Uuid;

/// Items with a stable identifier inside their owning sequence
pub trait Identified {
    fn id(&self) -> &str;
}

/// Fresh identifier for a new block or menu entry
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

/// Fresh identifier guaranteed not to collide with any item in `existing`
pub fn new_id_in<T: Identified>(existing: &[T]) -> String {
    loop {
        let id = new_id();
        if !existing.iter().any(|item| item.id() == id) {
            return id;
        }
    }
}

/// First id that appears more than once, if any
pub fn first_duplicate<T: Identified>(items: &[T]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    items.iter().map(|item| item.id()).find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str);

    impl Identified for Item {
        fn id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(first_duplicate(&[Item("a"), Item("b")]), None);
        assert_eq!(first_duplicate(&[Item("a"), Item("b"), Item("a")]), Some("a"));
    }
}
