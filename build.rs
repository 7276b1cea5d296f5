use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";

/// Keys the embedded defaults must define, per section.
const REQUIRED: &[(&str, &[&str])] = &[
    ("site", &["content_dir", "static_dir", "output_dir", "template"]),
    ("template", &["title_placeholder", "content_placeholder"]),
];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let source = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("cannot read {DEFAULT_CONFIG}: {e}"));
    let table: toml::Table = source
        .parse()
        .unwrap_or_else(|e| panic!("{DEFAULT_CONFIG} is not valid TOML: {e}"));

    for (section, keys) in REQUIRED {
        let Some(values) = table.get(*section).and_then(toml::Value::as_table) else {
            panic!("{DEFAULT_CONFIG}: missing [{section}] table");
        };
        for key in *keys {
            match values.get(*key).and_then(toml::Value::as_str) {
                Some(value) if !value.is_empty() => {}
                _ => panic!("{DEFAULT_CONFIG}: [{section}].{key} must be a non-empty string"),
            }
        }
    }
}
