//! Choosing the first panorama to show.
//!
//! A viewer link can carry `pano=NAME` in its query string. The binary
//! accepts that string verbatim (`--query`) as well as a plain `--pano`.

/// Value of the `pano` parameter in a URL query string.
///
/// A leading `?` is allowed. Values are form-decoded (`+` is a space,
/// `%XX` escapes are expanded). The first occurrence wins, even when it
/// is empty; [`resolve_initial_image`] treats an empty value as absent.
#[must_use]
pub fn pano_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == "pano")
        .map(|(_, value)| decode_component(value))
}

/// Pick the initial image: an explicit name, else the default.
pub fn resolve_initial_image(requested: Option<&str>, default: &str) -> String {
    match requested.filter(|name| !name.is_empty()) {
        Some(name) => {
            log::info!("Pano query param = {name}");
            name.to_owned()
        }
        None => {
            log::info!("No pano query param provided; using {default}");
            default.to_owned()
        }
    }
}

/// `application/x-www-form-urlencoded` decoding of one component.
/// Malformed escapes are kept literally.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let escaped = bytes
                    .get(i + 1..i + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = escaped {
                    out.push(byte);
                    i += 2;
                } else {
                    out.push(b'%');
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
