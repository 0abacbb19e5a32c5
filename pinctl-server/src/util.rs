/// Parse an integer given either in decimal or as `0x`-prefixed hexadecimal.
pub(crate) fn u64_from_int(value: &str) -> Result<u64, std::num::ParseIntError> {
    match value
        .get(..2)
        .filter(|prefix| prefix.eq_ignore_ascii_case("0x"))
    {
        Some(_) => u64::from_str_radix(&value[2..], 16),
        None => value.parse(),
    }
}
