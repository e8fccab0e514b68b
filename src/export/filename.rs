use chrono::{Local, NaiveDateTime};

/// Lower-case, runs of non-`[a-z0-9]` collapsed to `_`, trimmed; `untitled` when nothing is left.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_sep = false;
    for c in value.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_owned()
    } else {
        slug
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() { "png".to_owned() } else { ext }
}

/// `{slug}_{theme}_{YYYYMMDD_HHMMSS}.{ext}` for the given timestamp.
pub fn poster_filename_at(city: &str, theme_id: &str, ext: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.{}",
        slugify(city),
        theme_id,
        at.format("%Y%m%d_%H%M%S"),
        normalize_extension(ext)
    )
}

/// [`poster_filename_at`] stamped with the local time.
pub fn poster_filename(city: &str, theme_id: &str, ext: &str) -> String {
    poster_filename_at(city, theme_id, ext, Local::now().naive_local())
}

#[cfg(test)]
#[path = "../../tests/unit/export/filename.rs"]
mod tests;
