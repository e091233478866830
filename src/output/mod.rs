mod styling;

pub use styling::{dim, magenta_bold};

/// Prints the cirelay banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🤖 cirelay"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Discord → Jenkins command relay")
    );
}
