use indicatif::{ProgressBar, ProgressStyle};

pub mod templates {
    pub const SEND: &str =
        "\u{f048a} SEND [{bar:30.cyan}] {percent}% ({pos}/{len} bits) {msg}";
}

/// Progress bar over the bits of one frame.
pub fn symbol_bar(total_bits: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_bits);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(templates::SEND)
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    bar
}
