//! HTML character reference decoding

/// Longest reference name we look ahead for before giving up on a `;`
const MAX_REFERENCE_LEN: usize = 32;

/// Decode named, decimal and hexadecimal character references.
///
/// Unknown or malformed references are kept as written.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match decode_reference(tail) {
            Some((decoded, consumed)) => {
                output.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                output.push('&');
                rest = tail;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Decode the reference at the start of `tail` (the text after `&`).
/// Returns the character and the number of bytes consumed, including `;`.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    let end = tail
        .char_indices()
        .take(MAX_REFERENCE_LEN + 1)
        .take_while(|(_, ch)| *ch == ';' || *ch == '#' || ch.is_ascii_alphanumeric())
        .find(|(_, ch)| *ch == ';')
        .map(|(idx, _)| idx)?;

    let name = &tail[..end];
    let decoded = match name.strip_prefix('#') {
        Some(number) => decode_numeric(number)?,
        None => named_entity(name)?,
    };
    Some((decoded, end + 1))
}

fn decode_numeric(number: &str) -> Option<char> {
    let code_point = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    if code_point == 0 {
        return Some(char::REPLACEMENT_CHARACTER);
    }
    char::from_u32(code_point)
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "euro" => '€',
        "pound" => '£',
        "yen" => '¥',
        "cent" => '¢',
        "sect" => '§',
        "deg" => '°',
        "para" => '¶',
        "middot" => '·',
        "laquo" => '«',
        "raquo" => '»',
        "times" => '×',
        "divide" => '÷',
        "minus" => '−',
        "plusmn" => '±',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "bull" => '•',
        _ => return None,
    };
    Some(ch)
}
