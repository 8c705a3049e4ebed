use crate::common::error::GroveError;

/// クレート全体で使うResult型
///
/// # Examples
///
/// ```
/// use grove::common::result::GroveResult;
/// use grove::common::error::GroveError;
///
/// fn example_function() -> GroveResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> GroveResult<()> {
///     Err(GroveError::internal_error("Something went wrong"))
/// }
/// ```
pub type GroveResult<T> = Result<T, GroveError>;

/// `Option` から [`GroveResult`] への変換ヘルパー
pub trait OptionExt<T> {
    /// `None` を指定メッセージの内部エラーに変換
    ///
    /// ```
    /// use grove::common::result::{GroveResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: GroveResult<String> = none_value.ok_or_internal_error("Value not found");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_internal_error(self, message: impl Into<String>) -> GroveResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_internal_error(self, message: impl Into<String>) -> GroveResult<T> {
        self.ok_or_else(|| GroveError::internal_error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ext() {
        let some_value: Option<i32> = Some(42);
        assert_eq!(some_value.ok_or_internal_error("missing").unwrap(), 42);

        let none_value: Option<i32> = None;
        let err = none_value.ok_or_internal_error("missing").unwrap_err();
        assert!(matches!(err, GroveError::InternalError { .. }));
    }
}
