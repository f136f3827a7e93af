//! Split-RAR continuation parts: `.r00`, `.r01`, ... `.r15`, `.r99`, `.r100`.

/// True if `ext` is `R` followed by at least two ASCII digits, ignoring case.
///
/// Covers the `R0<digits>` and `R1<digits>` segment names as well as higher
/// part numbers such as `R99`. The whole string must match (`XR01` and `R01A`
/// do not); a single digit (`R1`) is not a part name.
pub fn is_split_archive_part(ext: &str) -> bool {
    match ext.as_bytes() {
        [r, digits @ ..] => {
            r.eq_ignore_ascii_case(&b'R')
                && digits.len() >= 2
                && digits.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}
