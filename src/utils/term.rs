use console::style;

const BANNER_WORD: &str = "SPARGAT";
const GLYPH_HEIGHT: usize = 5;

fn glyph(letter: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let rows = match letter {
        'S' => [" ____  ", r"/ ___| ", r"\___ \ ", " ___) |", r"|____/ "],
        'P' => [" ____  ", r"|  _ \ ", r"| |_) |", r"|  __/ ", "|_|    "],
        'A' => [
            "    _    ",
            r"   / \   ",
            r"  / _ \  ",
            r" / ___ \ ",
            r"/_/   \_\",
        ],
        'R' => [" ____  ", r"|  _ \ ", r"| |_) |", r"|  _ < ", r"|_| \_\"],
        'G' => ["  ____ ", r" / ___|", "| |  _ ", "| |_| |", r" \____|"],
        'T' => [" _____ ", "|_   _|", "  | |  ", "  | |  ", "  |_|  "],
        _ => return None,
    };
    Some(rows)
}

/// Render `word` in large ASCII letters. Letters without a glyph are skipped.
pub fn render_big(word: &str) -> String {
    let glyphs: Vec<_> = word
        .chars()
        .filter_map(|c| glyph(c.to_ascii_uppercase()))
        .collect();

    (0..GLYPH_HEIGHT)
        .map(|row| {
            let line: String = glyphs.iter().map(|g| g[row]).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn banner_text() -> String {
    render_big(BANNER_WORD)
}

/// Enable or disable colored output for the whole process.
pub fn init_colors(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub fn print_banner() {
    println!("{}", style(banner_text()).red().bold());
    println!();
}

pub fn success(message: &str) {
    println!("{}", style(message).green());
}

pub fn failure(message: &str) {
    println!("{}", style(message).red());
}
