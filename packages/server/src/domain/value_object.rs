//! 値オブジェクト
//!
//! 生の文字列や数値を検証済みの型に包み、ドメイン内で不正な値が流通しないようにします。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 表示名の最大文字数（クライアントの入力制限と同じ）
pub const DISPLAY_NAME_MAX_CHARS: usize = 20;

/// 表示名が空の場合に使う名前
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

/// 中継するメッセージの最大文字数
pub const MESSAGE_MAX_CHARS: usize = 2000;

/// 参加者 ID（トランスポートに依存しない不透明なトークン）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyParticipantId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ログ出力用の短縮表記（先頭 8 文字）
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((index, _)) => &self.0[..index],
            None => &self.0,
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 参加者 ID の生成器
pub struct ParticipantIdFactory;

impl ParticipantIdFactory {
    /// UUID v4 から新しい参加者 ID を生成
    pub fn generate() -> ParticipantId {
        ParticipantId(Uuid::new_v4().to_string())
    }
}

/// 表示名
///
/// 前後の空白は取り除かれ、空の場合は "Anonymous" になります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: &str) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::anonymous());
        }

        let actual = trimmed.chars().count();
        if actual > DISPLAY_NAME_MAX_CHARS {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX_CHARS,
                actual,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn anonymous() -> Self {
        Self(DEFAULT_DISPLAY_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 中継するメッセージ本文（内容はそのまま保持する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let actual = value.chars().count();
        if actual > MESSAGE_MAX_CHARS {
            return Err(ValueObjectError::MessageTooLong {
                max: MESSAGE_MAX_CHARS,
                actual,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `self` から `now` までの経過ミリ秒（負にはならない）
    pub fn elapsed_millis(&self, now: Timestamp) -> i64 {
        (now.0 - self.0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_rejects_blank() {
        // テスト項目: 空白のみの参加者 ID は作成できない
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = ParticipantId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyParticipantId));
    }

    #[test]
    fn test_participant_id_short_form() {
        // テスト項目: 短縮表記は先頭 8 文字、短い ID はそのまま
        // given (前提条件):
        let long = ParticipantId::new("0123456789abcdef".to_string()).unwrap();
        let short = ParticipantId::new("abc".to_string()).unwrap();

        // when (操作) / then (期待する結果):
        assert_eq!(long.short(), "01234567");
        assert_eq!(long.to_string(), "01234567");
        assert_eq!(short.short(), "abc");
    }

    #[test]
    fn test_participant_id_factory_generates_unique_ids() {
        // テスト項目: 生成される ID は毎回異なる
        // given (前提条件) / when (操作):
        let a = ParticipantIdFactory::generate();
        let b = ParticipantIdFactory::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_display_name_defaults_to_anonymous() {
        // テスト項目: 空の表示名は "Anonymous" になる
        // given (前提条件) / when (操作):
        let empty = DisplayName::new("").unwrap();
        let blank = DisplayName::new("  \t ").unwrap();

        // then (期待する結果):
        assert_eq!(empty.as_str(), DEFAULT_DISPLAY_NAME);
        assert_eq!(blank.as_str(), DEFAULT_DISPLAY_NAME);
        assert_eq!(DisplayName::default(), empty);
    }

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名の前後の空白が除去される
        // given (前提条件) / when (操作):
        let name = DisplayName::new("  alice  ").unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_display_name_length_boundary() {
        // テスト項目: 表示名は 20 文字まで（マルチバイト文字も 1 文字として数える）
        // given (前提条件):
        let exact = "あ".repeat(DISPLAY_NAME_MAX_CHARS);
        let over = "a".repeat(DISPLAY_NAME_MAX_CHARS + 1);

        // when (操作):
        let ok = DisplayName::new(&exact);
        let err = DisplayName::new(&over);

        // then (期待する結果):
        assert!(ok.is_ok());
        assert_eq!(
            err,
            Err(ValueObjectError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX_CHARS,
                actual: DISPLAY_NAME_MAX_CHARS + 1,
            })
        );
    }

    #[test]
    fn test_message_text_is_kept_verbatim() {
        // テスト項目: メッセージ本文は空白も含めてそのまま保持される
        // given (前提条件):
        let raw = "  hello  ".to_string();

        // when (操作):
        let text = MessageText::new(raw.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(text.as_str(), raw);
    }

    #[test]
    fn test_message_text_rejects_too_long() {
        // テスト項目: 上限を超えるメッセージはエラー
        // given (前提条件):
        let raw = "x".repeat(MESSAGE_MAX_CHARS + 1);

        // when (操作):
        let result = MessageText::try_from(raw);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ValueObjectError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_timestamp_elapsed_never_negative() {
        // テスト項目: 経過時間は時計が巻き戻っても負にならない
        // given (前提条件):
        let earlier = Timestamp::new(1_000);
        let later = Timestamp::new(4_500);

        // when (操作) / then (期待する結果):
        assert_eq!(earlier.elapsed_millis(later), 3_500);
        assert_eq!(later.elapsed_millis(earlier), 0);
    }
}
