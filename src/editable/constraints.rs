//! Edit constraints for the text editing core.
//!
//! Constraints decide how much of an insertion is accepted and how the
//! content is displayed. Content validation is a hook on the pipeline, see
//! [`Validator`].

/// Content validation hook. Receives the full candidate text of an edit and
/// returns true to accept it.
pub type Validator = Box<dyn Fn(&str) -> bool>;

/// Which dimensions of the layout area an insertion must fit into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeLimit {
    /// Text must fit the available width
    pub horizontal: bool,
    /// Text must fit the visible line count
    pub vertical: bool,
}

impl SizeLimit {
    pub fn is_enabled(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Constraints that limit what an insertion may add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditConstraints {
    /// Maximum length in code units (None = unlimited)
    pub character_limit: Option<usize>,

    /// Character shown instead of the content (None = plain text)
    pub password_alias: Option<char>,

    /// Truncate insertions that overflow the layout area
    pub size_limit: SizeLimit,
}

impl EditConstraints {
    /// No limits at all
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Plain input capped at `limit` code units
    pub fn with_character_limit(limit: usize) -> Self {
        Self {
            character_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Password input shown as `*`
    pub fn password() -> Self {
        Self {
            password_alias: Some('*'),
            ..Self::default()
        }
    }

    /// Single visible line that must not scroll horizontally
    pub fn fixed_field() -> Self {
        Self {
            size_limit: SizeLimit {
                horizontal: true,
                vertical: false,
            },
            ..Self::default()
        }
    }

    /// How many of `insert_len` code units fit next to `current_len` existing ones
    pub fn room_for(&self, current_len: usize, insert_len: usize) -> usize {
        match self.character_limit {
            Some(limit) => insert_len.min(limit.saturating_sub(current_len)),
            None => insert_len,
        }
    }

    /// Check if inserting text would exceed the character limit
    pub fn would_exceed_character_limit(&self, current_len: usize, insert_len: usize) -> bool {
        self.room_for(current_len, insert_len) < insert_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_constraints() {
        let c = EditConstraints::unlimited();
        assert_eq!(c.room_for(1_000_000, 10), 10);
        assert!(!c.would_exceed_character_limit(1_000_000, 10));
        assert!(!c.size_limit.is_enabled());
    }

    #[test]
    fn test_character_limit() {
        let c = EditConstraints::with_character_limit(5);
        assert_eq!(c.room_for(0, 8), 5);
        assert_eq!(c.room_for(3, 1), 1);
        assert_eq!(c.room_for(5, 1), 0);
        assert!(c.would_exceed_character_limit(3, 3));
        assert!(!c.would_exceed_character_limit(3, 2));
    }

    #[test]
    fn test_room_when_already_over_limit() {
        // Lowering the limit below the current length must not underflow
        let c = EditConstraints::with_character_limit(2);
        assert_eq!(c.room_for(4, 3), 0);
    }

    #[test]
    fn test_password_constraints() {
        let c = EditConstraints::password();
        assert_eq!(c.password_alias, Some('*'));
        assert_eq!(c.character_limit, None);
    }

    #[test]
    fn test_fixed_field() {
        let c = EditConstraints::fixed_field();
        assert!(c.size_limit.horizontal);
        assert!(!c.size_limit.vertical);
        assert!(c.size_limit.is_enabled());
    }
}
