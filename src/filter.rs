//! Project item inclusion

use std::path::Path;

/// Thumbnail used when promotional content is off.
pub const PLAIN_THUMBNAIL: &str = "thumb.png";

/// Thumbnail used when promotional content is on.
pub const PROMOTION_THUMBNAIL: &str = "thumbwithpromotion.png";

/// Whether the host should add `relative_name` to the generated project.
///
/// The two thumbnails are alternates chosen by `promote`; everything else is kept. Only the
/// final path component is compared, ignoring ASCII case.
pub fn should_include(relative_name: &str, promote: bool) -> bool {
    let file_name = Path::new(relative_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(relative_name);

    if file_name.eq_ignore_ascii_case(PLAIN_THUMBNAIL) {
        !promote
    } else if file_name.eq_ignore_ascii_case(PROMOTION_THUMBNAIL) {
        promote
    } else {
        true
    }
}
