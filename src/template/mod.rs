/// Literal `{name}` token substitution. Every occurrence of every bound token
/// is replaced; tokens with no binding are left verbatim. Not a template
/// language: no conditionals, loops, or escaping.
pub fn render(template: &str, vars: &[(String, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

pub fn var(name: &str, value: impl Into<String>) -> (String, String) {
    (name.to_string(), value.into())
}
