//! struct tag 解析
//!
//! tag 的约定格式是以空格分隔的 `key:"value"` 序列, value 是带转义的 Go 字符串。
//! 遇到不合法的输入时停止解析, 之前解析出的键值对仍然有效。

/// 解析后的 struct tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    pairs: Vec<(String, String)>,
}

impl StructTag {
    /// 从 tag 字面量解析 (反引号字符串、双引号字符串或未加引号的原文)
    pub fn parse(literal: &str) -> Self {
        let Some(content) = decode_literal(literal) else {
            return Self::default();
        };
        Self {
            pairs: lex_pairs(&content),
        }
    }

    /// 按 key 查找第一个匹配的 value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 提取 json 序列化键
///
/// 取 `json` 的值中第一个逗号之前的部分; `-` 和空串都视为没有键。
pub fn json_key(tag_text: &str) -> Option<String> {
    if tag_text.is_empty() {
        return None;
    }
    let tag = StructTag::parse(tag_text);
    let value = tag.get("json")?;
    let key = value.split(',').next().unwrap_or(value);
    match key {
        "" | "-" => None,
        k => Some(k.to_string()),
    }
}

/// 去掉字面量外层的引号
fn decode_literal(literal: &str) -> Option<String> {
    let literal = literal.trim();
    if literal.len() >= 2 && literal.starts_with('`') && literal.ends_with('`') {
        // 原始字符串中的 \r 会被 Go 编译器丢弃
        return Some(literal[1..literal.len() - 1].replace('\r', ""));
    }
    if literal.starts_with('"') {
        return unquote(literal);
    }
    Some(literal.to_string())
}

fn lex_pairs(tag: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = tag.as_bytes();

    loop {
        while let [b' ', tail @ ..] = rest {
            rest = tail;
        }
        if rest.is_empty() {
            break;
        }

        // key: 直到 ':' 为止的可见字符
        let key_len = rest
            .iter()
            .take_while(|&&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        if key_len == 0 || key_len + 1 >= rest.len() || rest[key_len] != b':' || rest[key_len + 1] != b'"' {
            break;
        }
        let key = &rest[..key_len];
        rest = &rest[key_len + 1..];

        // value: 带转义的双引号字符串
        let mut i = 1;
        while i < rest.len() && rest[i] != b'"' {
            if rest[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= rest.len() {
            break;
        }
        let quoted = &rest[..=i];
        rest = &rest[i + 1..];

        let (Ok(key), Ok(quoted)) = (std::str::from_utf8(key), std::str::from_utf8(quoted)) else {
            break;
        };
        let Some(value) = unquote(quoted) else {
            break;
        };
        pairs.push((key.to_string(), value));
    }

    pairs
}

/// 解码 Go 双引号字符串字面量
fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = match chars.next()? {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    'a' => '\x07',
                    'b' => '\x08',
                    'f' => '\x0c',
                    'v' => '\x0b',
                    '\\' => '\\',
                    '"' => '"',
                    '\'' => '\'',
                    'x' => read_code_point(&mut chars, 2, 16)?,
                    'u' => read_code_point(&mut chars, 4, 16)?,
                    'U' => read_code_point(&mut chars, 8, 16)?,
                    d @ '0'..='7' => {
                        let rest: String = chars.by_ref().take(2).collect();
                        char::from_u32(u32::from_str_radix(&format!("{d}{rest}"), 8).ok()?)?
                    }
                    _ => return None,
                };
                out.push(escaped);
            }
            '"' | '\n' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}

fn read_code_point(chars: &mut std::str::Chars<'_>, digits: usize, radix: u32) -> Option<char> {
    let text: String = chars.by_ref().take(digits).collect();
    if text.len() != digits {
        return None;
    }
    char::from_u32(u32::from_str_radix(&text, radix).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_key_from_raw_literal() {
        assert_eq!(json_key(r#"`json:"account_id"`"#), Some("account_id".to_string()));
    }

    #[test]
    fn test_json_key_options_are_dropped() {
        assert_eq!(json_key(r#"`json:"changes,omitempty"`"#), Some("changes".to_string()));
        assert_eq!(json_key(r#"`json:",omitempty"`"#), None);
    }

    #[test]
    fn test_json_key_dash_means_absent() {
        assert_eq!(json_key(r#"`json:"-"`"#), None);
        // "-," 是字面量键 "-" 的写法, 逗号前仍然是 "-"
        assert_eq!(json_key(r#"`json:"-,"`"#), None);
    }

    #[test]
    fn test_json_key_among_other_keys() {
        let tag = r#"`db:"device_id" json:"device_id" validate:"required"`"#;
        assert_eq!(json_key(tag), Some("device_id".to_string()));
    }

    #[test]
    fn test_json_key_missing() {
        assert_eq!(json_key(""), None);
        assert_eq!(json_key(r#"`yaml:"name"`"#), None);
        // 前缀相同但 key 不同
        assert_eq!(json_key(r#"`jsonx:"name"`"#), None);
    }

    #[test]
    fn test_value_with_spaces_and_escaped_quotes() {
        let tag = StructTag::parse(r#"`desc:"a \"quoted\" value, with spaces" json:"name"`"#);
        assert_eq!(tag.get("desc"), Some(r#"a "quoted" value, with spaces"#));
        assert_eq!(tag.get("json"), Some("name"));
    }

    #[test]
    fn test_interpreted_string_literal() {
        let tag = StructTag::parse(r#""json:\"event_id\"""#);
        assert_eq!(tag.get("json"), Some("event_id"));
    }

    #[test]
    fn test_malformed_tail_keeps_earlier_pairs() {
        let tag = StructTag::parse(r#"`json:"id" broken`"#);
        assert_eq!(tag.pairs.len(), 1);
        assert_eq!(tag.get("json"), Some("id"));

        let tag = StructTag::parse(r#"`json:"unterminated`"#);
        assert!(tag.pairs.is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let tag = StructTag::parse(r#"`json:"first" json:"second"`"#);
        assert_eq!(tag.get("json"), Some("first"));
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote(r#""a\tb""#), Some("a\tb".to_string()));
        assert_eq!(unquote(r#""é\x41\101""#), Some("éAA".to_string()));
        assert_eq!(unquote(r#""bad\q""#), None);
        assert_eq!(unquote(r#""\""#), None);
    }
}
