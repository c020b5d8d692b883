use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

// https://users.rust-lang.org/t/is-there-a-simple-way-to-give-a-default-string-if-the-string-variable-is-empty/100411

pub trait StringExt {
    fn or(
        self,
        dflt: &str,
    ) -> String;
}

impl<S: Into<String>> StringExt for S {
    fn or(
        self,
        dflt: &str,
    ) -> String {
        // Re-use a `String`s capacity, maybe
        let mut s = self.into();
        if s.is_empty() {
            s.push_str(dflt);
        }
        s
    }
}

/// Red, with the whole `context: cause` chain on one line.
pub fn fmt_error(error: &anyhow::Error) -> String {
    format!("{error:#}").red().bold().to_string()
}

pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn print_table<T: Tabled>(rows: &[T]) {
    println!("{}", render_table(rows));
}
