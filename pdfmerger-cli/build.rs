use clap::CommandFactory;

#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

// Renders the man page into OUT_DIR for packagers.
fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir =
        std::path::PathBuf::from(std::env::var_os("OUT_DIR").ok_or(std::io::ErrorKind::NotFound)?);

    let mut page: Vec<u8> = Vec::new();
    clap_mangen::Man::new(cli::Cli::command()).render(&mut page)?;

    std::fs::write(out_dir.join("pdfmerger.1"), page)
}
