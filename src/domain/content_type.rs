//! Well-known content types. Any other string is equally valid.

pub const LINK: &str = "link";
pub const MENU: &str = "menu";
pub const IMAGE: &str = "image";
pub const SEPARATOR: &str = "separator";

pub const INPUT_BUTTON: &str = "button_input";
pub const INPUT_CHECKBOX: &str = "checkbox_input";
pub const INPUT_COLOR: &str = "color_input";
pub const INPUT_DATE: &str = "date_input";
pub const INPUT_DATETIME_LOCAL: &str = "datetimeloc_input";
pub const INPUT_EMAIL: &str = "email_input";
pub const INPUT_FILE: &str = "file_input";
pub const INPUT_HIDDEN: &str = "hidden_input";
pub const INPUT_IMAGE: &str = "image_input";
pub const INPUT_MONTH: &str = "month_input";
pub const INPUT_NUMBER: &str = "number_input";
pub const INPUT_PASSWORD: &str = "password_input";
pub const INPUT_RADIO: &str = "radio_input";
pub const INPUT_RANGE: &str = "range_input";
pub const INPUT_RESET: &str = "reset_input";
pub const INPUT_SEARCH: &str = "search_input";
pub const INPUT_SUBMIT: &str = "submit_input";
pub const INPUT_TEL: &str = "tel_input";
pub const INPUT_TEXT: &str = "text_input";
pub const INPUT_TIME: &str = "time_input";
pub const INPUT_URL: &str = "url_input";
pub const INPUT_WEEK: &str = "week_input";

/// True for the `*_input` family.
pub fn is_input(content_type: &str) -> bool {
    content_type.ends_with("_input")
}
