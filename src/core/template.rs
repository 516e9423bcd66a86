use std::collections::HashMap;

/// 範本中可辨識的佔位符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    CustomerName,
    Service,
    AppointmentDate,
    CustomerEmail,
    Phone,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::CustomerName,
        Placeholder::Service,
        Placeholder::AppointmentDate,
        Placeholder::CustomerEmail,
        Placeholder::Phone,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::CustomerName => "{customer_name}",
            Self::Service => "{service}",
            Self::AppointmentDate => "{appointment_date}",
            Self::CustomerEmail => "{customer_email}",
            Self::Phone => "{phone}",
        }
    }
}

pub type TemplateValues = HashMap<Placeholder, String>;

/// Replaces every recognised placeholder that has a value in `values`.
///
/// Single left-to-right pass: substituted text is never rescanned, so a customer
/// name that itself contains `{service}` comes out verbatim. Unrecognised tokens,
/// and recognised tokens without a value, are left untouched.
pub fn render(template: &str, values: &TemplateValues) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        output.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let hit = Placeholder::ALL.iter().find_map(|placeholder| {
            let token = placeholder.token();
            if tail.starts_with(token) {
                values.get(placeholder).map(|value| (token.len(), value))
            } else {
                None
            }
        });

        match hit {
            Some((len, value)) => {
                output.push_str(value);
                rest = &tail[len..];
            }
            None => {
                output.push('{');
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(Placeholder, &str)]) -> TemplateValues {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_basic_substitution() {
        let v = values(&[
            (Placeholder::CustomerName, "Jane"),
            (Placeholder::Service, "wedding"),
        ]);
        assert_eq!(
            render("Hi {customer_name}, service {service}", &v),
            "Hi Jane, service wedding"
        );
    }

    #[test]
    fn test_repeated_tokens_all_replaced() {
        let v = values(&[(Placeholder::CustomerName, "Jane")]);
        assert_eq!(
            render("{customer_name}/{customer_name}", &v),
            "Jane/Jane"
        );
    }

    #[test]
    fn test_unknown_and_unmapped_tokens_left_verbatim() {
        let v = values(&[(Placeholder::Service, "port1")]);
        assert_eq!(
            render("{service} {unknown} {phone} {", &v),
            "port1 {unknown} {phone} {"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let v = values(&[
            (Placeholder::CustomerName, "{service}"),
            (Placeholder::Service, "port1"),
        ]);
        assert_eq!(render("{customer_name}", &v), "{service}");
    }

    #[test]
    fn test_render_is_deterministic() {
        let v = values(&[
            (Placeholder::CustomerName, "Jane"),
            (Placeholder::AppointmentDate, "Wednesday, January 10, 2024"),
            (Placeholder::CustomerEmail, "jane@example.com"),
            (Placeholder::Phone, "555-0100"),
        ]);
        let template = "Dear {customer_name},\n- Date: {appointment_date}\n- {customer_email} / {phone}";
        assert_eq!(render(template, &v), render(template, &v));
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let v = values(&[(Placeholder::CustomerName, "王小明")]);
        assert_eq!(render("親愛的 {customer_name} 您好", &v), "親愛的 王小明 您好");
    }
}
