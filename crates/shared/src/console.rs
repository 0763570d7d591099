use console::style;

pub struct Console;

impl Console {
    const fn get_width() -> usize {
        80
    }

    fn horizontal_border() -> String {
        "═".repeat(Self::get_width())
    }

    pub fn section(title: &str) {
        println!();
        let width = Self::get_width();
        let formatted_title = format!("{title:^width$}");
        let border = Self::horizontal_border();

        println!("{}", style(&border).blue().bold());
        println!("{}", style(formatted_title).blue().bold());
        println!("{}", style(&border).blue().bold());
        println!();
    }

    pub fn title(text: &str) {
        println!();
        println!("{}", style(format!("### {text} ###")).magenta().bold());
    }

    pub fn info(label: &str, value: &str) {
        println!("{}: {}", style(label).dim().magenta(), style(value).white());
    }

    /// Aligned `label: value` line used by tabular reports.
    pub fn row(indent: usize, label: &str, label_width: usize, value: &str) {
        println!(
            "{:indent$}{}: {}",
            "",
            style(format!("{label:label_width$}")).dim(),
            value
        );
    }

    pub fn plain(text: &str) {
        println!("{text}");
    }

    pub fn success(text: &str) {
        println!("{} {}", style("✓").green().bold(), style(text).green());
    }

    pub fn warning(text: &str) {
        println!("{} {}", style("⚠").yellow().bold(), style(text).yellow());
    }

    pub fn error(text: &str) {
        println!("{} {}", style("✗").red().bold(), style(text).red());
    }

    pub fn progress(text: &str) {
        println!("{} {}", style("→").cyan().bold(), style(text).cyan());
    }

    pub fn pass_fail(passed: bool, text: &str) {
        if passed {
            println!("{} - {text}", style("✓ PASS").green().bold());
        } else {
            println!("{} - {text}", style("✗ FAIL").red().bold());
        }
    }
}
