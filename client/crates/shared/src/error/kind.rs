//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum the UI layer uses to decide how an error
//! is presented (inline under a field, as a banner, or not at all).

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアント側で発生するエラーの分類を定義します。
/// 各バリアントはユーザーへの表示方法と再試行可否にマッピングされます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Validation;
/// assert!(kind.is_recoverable());
/// assert_eq!(kind.as_str(), "Invalid Input");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力検証エラー: フィールド単位で表示する
    Validation,
    /// 認証失敗: 資格情報が正しくない
    Unauthorized,
    /// 競合: 既に存在するアカウントなど
    Conflict,
    /// 処理中: 前回の送信がまだ完了していない
    Busy,
    /// 内部エラー
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Unauthorized.as_str(), "Not Signed In");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Invalid Input",
            ErrorKind::Unauthorized => "Not Signed In",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Busy => "Busy",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// ユーザーが再試行できるエラーかどうか
    ///
    /// `Internal` 以外はすべて回復可能です。
    /// 回復不能なエラーはログに記録すべきです。
    #[inline]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
