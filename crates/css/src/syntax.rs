// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

// inverse of parse_declarations: "color: red; font-size: 12px;"
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last declared value of `name` in an inline style string.
pub fn declared_value(style: &str, name: &str) -> Option<String> {
    parse_declarations(style)
        .into_iter()
        .rev()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(|d| d.value)
}

/// Replace (or append) `name` in an inline style string.
pub fn set_declaration(style: &str, name: &str, value: &str) -> String {
    let name = name.to_ascii_lowercase();
    let mut declarations = parse_declarations(style);
    declarations.retain(|d| d.name != name);
    declarations.push(Declaration {
        name,
        value: value.trim().to_string(),
    });
    serialize_declarations(&declarations)
}
