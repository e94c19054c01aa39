use redacta::{AnonymizeResultVerbose, DetectedSpan, OperatorRegistry, OperatorTraits};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input_len: usize, span_count: usize, res: &AnonymizeResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Anonymizing: {} bytes, {} spans", input_len, span_count), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Conflicts ━━━", ansi::GRAY));
    print_conflicts(res, &palette);

    println!("\n{}", palette.paint("━━━ Output ━━━", ansi::GRAY));
    println!("  {}", res.result.text);

    println!("\n{}", palette.paint("━━━ Substitutions ━━━", ansi::GRAY));
    if res.result.items.is_empty() {
        println!("{}", palette.dim("  No substitutions applied"));
    } else {
        print_items(res, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Resolve: {}  │  Splice: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.resolve), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.splice)),
    );
    println!();
}

fn print_conflicts(res: &AnonymizeResultVerbose, palette: &ansi::Palette) {
    println!(
        "  {} {}",
        palette.paint("kept:", ansi::BLUE),
        palette.paint(format!("✓ {} spans", res.details.kept), ansi::GREEN)
    );
    if res.details.dropped.is_empty() {
        println!("  {} {}", palette.paint("dropped:", ansi::BLUE), palette.dim("✗ 0 spans"));
        return;
    }

    println!(
        "  {} {}",
        palette.paint("dropped:", ansi::BLUE),
        palette.paint(format!("{} spans", res.details.dropped.len()), ansi::YELLOW)
    );
    for span in res.details.dropped.iter().take(5) {
        println!("    {}", fmt_span_compact(span, palette));
    }
    if res.details.dropped.len() > 5 {
        println!("    {}", palette.dim(format!("... +{} more", res.details.dropped.len() - 5)));
    }
}

fn print_items(res: &AnonymizeResultVerbose, palette: &ansi::Palette) {
    for (idx, item) in res.result.items.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&item.text, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", item.start, item.end), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("entity:"),
            palette.paint(&item.entity_type, ansi::BLUE),
            palette.dim("│ operator:"),
            palette.paint(&item.operator, ansi::CYAN)
        );
    }
}

pub fn print_operators(registry: &OperatorRegistry, color: bool) {
    let palette = ansi::Palette::new(color);
    for (name, op) in registry.iter() {
        println!("{} {}", palette.paint(format!("{name:<10}"), ansi::CYAN), palette.dim(fmt_traits(op.traits())));
    }
}

fn fmt_traits(traits: OperatorTraits) -> String {
    let names: Vec<&str> = traits
        .iter_names()
        .map(|(name, _)| match name {
            "REVERSIBLE" => "reversible",
            "LENGTH_PRESERVING" => "length-preserving",
            "DETERMINISTIC" => "deterministic",
            other => other,
        })
        .collect();
    if names.is_empty() { "-".to_string() } else { names.join(", ") }
}

fn fmt_span_compact(span: &DetectedSpan, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(format!("{}..{}", span.start, span.end), ansi::YELLOW),
        palette.paint(&span.entity_type, ansi::BLUE),
        palette.dim(format!("score {:.2}", span.score))
    )
}
