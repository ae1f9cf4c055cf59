// Example: parse a JSON file (or a built-in sample) and pretty-print it

use picodom::{JsonError, JsonValue};

const SAMPLE: &str = r#"{"server":{"host":"localhost","port":8080},"retries":[1,2.5,NaN]}"#;

fn main() -> Result<(), JsonError> {
    let doc = match std::env::args().nth(1) {
        Some(path) => {
            let doc = JsonValue::from_file(&path);
            if let Err(err) = &doc {
                eprintln!("failed to read {path}: {err} (line {})", err.error_line());
            }
            doc?
        }
        None => {
            println!("no file given, using the built-in sample");
            JsonValue::parse(SAMPLE)?
        }
    };

    println!("{}", doc.to_json(false));
    Ok(())
}
