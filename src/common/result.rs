use crate::common::error::ChronosError;

/// chronos全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use chronos::common::result::ChronosResult;
/// use chronos::common::error::ChronosError;
///
/// fn example_function() -> ChronosResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> ChronosResult<()> {
///     Err(ChronosError::internal_error("Something went wrong"))
/// }
/// ```
pub type ChronosResult<T> = Result<T, ChronosError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// Option値をValidationErrorに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use chronos::common::result::{ChronosResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: ChronosResult<String> = none_value.ok_or_validation_error("field", "required");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ChronosResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ChronosResult<T> {
        self.ok_or_else(|| ChronosError::validation_error(field, message, None))
    }
}

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// ファイルシステムエラーとしてChronosResultに変換
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> ChronosResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> ChronosResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            ChronosError::filesystem_error_with_source(message, path, io_error)
        })
    }
}

/// ChronosResult用のヘルパー
pub trait ChronosResultExt<T> {
    /// Optionに変換（エラーをログ出力）
    fn to_option_logged(self) -> Option<T>;
}

impl<T> ChronosResultExt<T> for ChronosResult<T> {
    fn to_option_logged(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}
