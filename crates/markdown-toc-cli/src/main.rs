use std::process;

fn main() {
    match markdown_toc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("markdown-toc-gen error: {err:#}");
            process::exit(1);
        }
    }
}
