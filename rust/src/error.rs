//! Error handling and result types for BTree operations.
//!
//! Lookups and removals of absent keys are not errors; they report absence
//! through `Option`. The error type covers invalid construction parameters,
//! the explicit `*_item` lookups and the integrity checks.

/// Error type for B-tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BTreeError {
    /// Key not found in the tree.
    KeyNotFound,
    /// Invalid order specified at construction.
    InvalidOrder(String),
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Tree corruption detected.
    CorruptedTree(String),
}

impl BTreeError {
    /// Create an InvalidOrder error with context
    pub fn invalid_order(order: usize, min_required: usize) -> Self {
        Self::InvalidOrder(format!(
            "Order {} is invalid (minimum required: {})",
            order, min_required
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Check if this error is an order error
    pub fn is_order_error(&self) -> bool {
        matches!(self, Self::InvalidOrder(_))
    }

    /// Check if this error reports a broken tree
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, Self::DataIntegrityError(_) | Self::CorruptedTree(_))
    }
}

impl std::fmt::Display for BTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BTreeError::KeyNotFound => write!(f, "Key not found in tree"),
            BTreeError::InvalidOrder(msg) => write!(f, "Invalid order: {}", msg),
            BTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            BTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for BTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, BTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, BTreeError>;

/// Result type for checked tree modifications
pub type ModifyResult<T> = Result<T, BTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, BTreeError>;

/// Result extension trait for attaching context to errors
pub trait BTreeResultExt<T> {
    /// Convert to a BTreeResult with additional context
    fn with_context(self, context: &str) -> BTreeResult<T>;

    /// Convert to a BTreeResult with operation context
    fn with_operation(self, operation: &str) -> BTreeResult<T>;
}

impl<T> BTreeResultExt<T> for Result<T, BTreeError> {
    fn with_context(self, context: &str) -> BTreeResult<T> {
        self.map_err(|e| match e {
            BTreeError::KeyNotFound => BTreeError::KeyNotFound,
            BTreeError::InvalidOrder(msg) => {
                BTreeError::InvalidOrder(format!("{}: {}", context, msg))
            }
            BTreeError::DataIntegrityError(msg) => BTreeError::data_integrity(context, &msg),
            BTreeError::CorruptedTree(msg) => BTreeError::corrupted_tree(context, &msg),
        })
    }

    fn with_operation(self, operation: &str) -> BTreeResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_order_message() {
        let err = BTreeError::invalid_order(2, 3);
        assert!(err.is_order_error());
        assert_eq!(
            err.to_string(),
            "Invalid order: Order 2 is invalid (minimum required: 3)"
        );
    }

    #[test]
    fn test_with_operation_keeps_variant() {
        let result: BTreeResult<()> = Err(BTreeError::corrupted_tree("Parent link", "node 4"));
        let err = result.with_operation("remove").unwrap_err();
        assert!(err.is_integrity_error());
        assert_eq!(
            err.to_string(),
            "Corrupted tree: Operation 'remove' corruption: Parent link corruption: node 4"
        );

        let missing: BTreeResult<()> = Err(BTreeError::KeyNotFound);
        assert_eq!(missing.with_context("get").unwrap_err(), BTreeError::KeyNotFound);
    }
}
