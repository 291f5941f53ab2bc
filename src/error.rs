use thiserror::Error;

/// Errors returned when constructing a [`LinklessTree`](crate::LinklessTree).
///
/// Every other operation is total: lookups, rank access and removal report absence
/// through `bool` or `Option` instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A constructor argument was outside its valid range.
    #[error("invalid argument `{name}`: {value}")]
    InvalidArgument {
        /// Name of the rejected parameter.
        name: &'static str,
        /// The value that was passed.
        value: usize,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn invalid_argument_display() {
        let error = Error::InvalidArgument { name: "capacity", value: 0 };
        assert_eq!(error.to_string(), "invalid argument `capacity`: 0");
    }
}
