//! Built-in file type table.
//!
//! Rows are `(extension, mime type, groups)`, sorted by extension. Lookups
//! return results in this order.

pub(crate) const BUILTIN_TYPES: &[(&str, &str, &[&str])] = &[
    ("3gp", "video/3gpp", &["video"]),
    ("7z", "application/x-7z-compressed", &["archive"]),
    ("aac", "audio/aac", &["audio"]),
    ("aif", "audio/x-aiff", &["audio"]),
    ("aifc", "audio/x-aiff", &["audio"]),
    ("aiff", "audio/x-aiff", &["audio"]),
    ("au", "audio/au", &["audio"]),
    ("avi", "video/x-msvideo", &["video"]),
    ("bmp", "image/bmp", &["image"]),
    ("csv", "text/csv", &["spreadsheet"]),
    ("doc", "application/msword", &["document"]),
    (
        "docm",
        "application/vnd.ms-word.document.macroEnabled.12",
        &["document"],
    ),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &["document"],
    ),
    ("dot", "application/msword", &["document"]),
    (
        "dotx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template",
        &["document"],
    ),
    ("epub", "application/epub+zip", &["document"]),
    ("flac", "audio/flac", &["audio"]),
    ("flv", "video/x-flv", &["video"]),
    ("gif", "image/gif", &["image", "web_image"]),
    ("gz", "application/gzip", &["archive"]),
    ("heic", "image/heic", &["image"]),
    ("ico", "image/vnd.microsoft.icon", &["image"]),
    ("jpe", "image/jpeg", &["image", "web_image"]),
    ("jpeg", "image/jpeg", &["image", "web_image"]),
    ("jpg", "image/jpeg", &["image", "web_image"]),
    ("m4a", "audio/mp4", &["audio"]),
    ("m4v", "video/mp4", &["video"]),
    ("mkv", "video/x-matroska", &["video"]),
    ("mov", "video/quicktime", &["video"]),
    ("mp3", "audio/mp3", &["audio"]),
    ("mp4", "video/mp4", &["video"]),
    ("mpeg", "video/mpeg", &["video"]),
    ("mpg", "video/mpeg", &["video"]),
    ("odp", "application/vnd.oasis.opendocument.presentation", &["presentation"]),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet", &["spreadsheet"]),
    ("odt", "application/vnd.oasis.opendocument.text", &["document"]),
    ("oga", "audio/ogg", &["audio"]),
    ("ogg", "audio/ogg", &["audio"]),
    ("ogv", "video/ogg", &["video"]),
    ("ott", "application/vnd.oasis.opendocument.text-template", &["document"]),
    ("pdf", "application/pdf", &["document"]),
    ("png", "image/png", &["image", "web_image"]),
    ("ppt", "application/vnd.ms-powerpoint", &["presentation"]),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        &["presentation"],
    ),
    ("qt", "video/quicktime", &["video"]),
    ("rar", "application/x-rar-compressed", &["archive"]),
    ("rtf", "text/rtf", &["document"]),
    ("svg", "image/svg+xml", &["image", "web_image"]),
    ("tar", "application/x-tar", &["archive"]),
    ("tif", "image/tiff", &["image"]),
    ("tiff", "image/tiff", &["image"]),
    ("txt", "text/plain", &["document"]),
    ("wav", "audio/wav", &["audio"]),
    ("webm", "video/webm", &["video"]),
    ("webp", "image/webp", &["image", "web_image"]),
    ("wma", "audio/x-ms-wma", &["audio"]),
    ("wmv", "video/x-ms-wmv", &["video"]),
    ("xls", "application/vnd.ms-excel", &["spreadsheet"]),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &["spreadsheet"],
    ),
    ("zip", "application/zip", &["archive"]),
];
