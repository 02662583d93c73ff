// Re-embed translations whenever a locale file changes.
fn main() {
    println!("cargo:rerun-if-changed=locales");
    let Ok(entries) = std::fs::read_dir("locales") else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path
            .extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml")
        {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
