//! Localized message catalog for user-visible error text.
//!
//! A static table keyed by ([`Lang`], [`Message`]). Handlers resolve the
//! request language once and pass it here when building a [`CoreError`].
//!
//! [`CoreError`]: crate::error::CoreError

use crate::error::CoreError;
use crate::lang::Lang;

/// Keys into the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    TopicNotFound,
    ProductNotFound,
    ThemeNotFound,
    CategoryNotFound,
    TopicExists,
    TopicNameTaken,
    TopicLinkedToAudio,
    TopicLinkedToVideo,
    TranslationNameRequired,
    ProductExists,
    ProductNameTaken,
    ThemeExists,
    CategoryExists,
    EmptyKeyList,
    UnknownStatus,
}

/// Look up the localized text for `msg`.
pub fn t(lang: Lang, msg: Message) -> &'static str {
    match lang {
        Lang::En => en(msg),
        Lang::Vi => vi(msg),
    }
}

/// Build a localized [`CoreError::NotFound`] for `key`.
pub fn not_found(lang: Lang, msg: Message, key: impl Into<String>) -> CoreError {
    CoreError::NotFound {
        message: t(lang, msg).to_string(),
        key: key.into(),
    }
}

fn en(msg: Message) -> &'static str {
    match msg {
        Message::TopicNotFound => "Topic not found",
        Message::ProductNotFound => "Product not found",
        Message::ThemeNotFound => "Theme not found",
        Message::CategoryNotFound => "Category not found",
        Message::TopicExists => "Topic already exists",
        Message::TopicNameTaken => "Topic name is already used by another topic",
        Message::TopicLinkedToAudio => "An audio is linked to this topic",
        Message::TopicLinkedToVideo => "A video is linked to this topic",
        Message::TranslationNameRequired => "A name is required to add a new translation",
        Message::ProductExists => "Product already exists",
        Message::ProductNameTaken => "Product name is already used by another product",
        Message::ThemeExists => "Theme already exists",
        Message::CategoryExists => "Category already exists",
        Message::EmptyKeyList => "At least one key is required",
        Message::UnknownStatus => "Unknown product status",
    }
}

fn vi(msg: Message) -> &'static str {
    match msg {
        Message::TopicNotFound => "Không tìm thấy chủ đề",
        Message::ProductNotFound => "Không tìm thấy sản phẩm",
        Message::ThemeNotFound => "Không tìm thấy giao diện",
        Message::CategoryNotFound => "Không tìm thấy danh mục",
        Message::TopicExists => "Chủ đề đã tồn tại",
        Message::TopicNameTaken => "Tên chủ đề đã được sử dụng bởi chủ đề khác",
        Message::TopicLinkedToAudio => "Có âm thanh đang liên kết với chủ đề này",
        Message::TopicLinkedToVideo => "Có video đang liên kết với chủ đề này",
        Message::TranslationNameRequired => "Cần có tên để thêm bản dịch mới",
        Message::ProductExists => "Sản phẩm đã tồn tại",
        Message::ProductNameTaken => "Tên sản phẩm đã được sử dụng bởi sản phẩm khác",
        Message::ThemeExists => "Giao diện đã tồn tại",
        Message::CategoryExists => "Danh mục đã tồn tại",
        Message::EmptyKeyList => "Cần ít nhất một khóa",
        Message::UnknownStatus => "Trạng thái sản phẩm không hợp lệ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_message_is_translated_in_every_language() {
        let all = [
            Message::TopicNotFound,
            Message::ProductNotFound,
            Message::ThemeNotFound,
            Message::CategoryNotFound,
            Message::TopicExists,
            Message::TopicNameTaken,
            Message::TopicLinkedToAudio,
            Message::TopicLinkedToVideo,
            Message::TranslationNameRequired,
            Message::ProductExists,
            Message::ProductNameTaken,
            Message::ThemeExists,
            Message::CategoryExists,
            Message::EmptyKeyList,
            Message::UnknownStatus,
        ];
        for lang in Lang::ALL {
            for msg in all {
                assert!(!t(lang, msg).is_empty(), "{lang} / {msg:?} is empty");
            }
        }
    }

    #[test]
    fn not_found_carries_localized_message_and_key() {
        let err = not_found(Lang::Vi, Message::ProductNotFound, "mug");
        assert_eq!(err.to_string(), "Không tìm thấy sản phẩm: mug");
    }

    #[test]
    fn english_and_vietnamese_differ() {
        assert_eq!(t(Lang::En, Message::TopicNotFound), "Topic not found");
        assert_eq!(t(Lang::Vi, Message::TopicNotFound), "Không tìm thấy chủ đề");
    }
}
