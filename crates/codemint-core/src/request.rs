use crate::error::{CoreError, Result};
use crate::prefix::Prefix;
use serde::{Deserialize, Serialize};

/// A validated ask for `quantity` new codes under `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    prefix: Prefix,
    quantity: usize,
}

impl GenerationRequest {
    /// Validates a raw prefix and quantity.
    ///
    /// The quantity is taken as a signed integer so that zero and negative
    /// values coming from user input are rejected rather than wrapped.
    pub fn new(prefix: &str, quantity: i64) -> Result<Self> {
        let prefix = Prefix::parse(prefix)?;
        Self::with_prefix(prefix, quantity)
    }

    pub fn with_prefix(prefix: Prefix, quantity: i64) -> Result<Self> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        let quantity =
            usize::try_from(quantity).map_err(|_| CoreError::InvalidQuantity(quantity))?;
        prefix.suffix_len()?;

        Ok(Self { prefix, quantity })
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn quantity(&self) -> usize {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_quantity() {
        let request = GenerationRequest::new("abc", 5).unwrap();
        assert_eq!(request.prefix().as_str(), "ABC");
        assert_eq!(request.quantity(), 5);
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        assert_eq!(
            GenerationRequest::new("ABC", 0),
            Err(CoreError::InvalidQuantity(0))
        );
        assert_eq!(
            GenerationRequest::new("ABC", -3),
            Err(CoreError::InvalidQuantity(-3))
        );
    }

    #[test]
    fn rejects_invalid_prefix_before_quantity() {
        assert!(matches!(
            GenerationRequest::new("AB", 0),
            Err(CoreError::InvalidPrefix(_))
        ));
    }
}
