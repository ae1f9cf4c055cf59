// Example demonstrating programmatic DOM building

use picodom::JsonValue;

fn main() {
    let mut doc = JsonValue::new();
    doc.set("name", "picodom");
    doc.set("stable", true);
    if let Some(tags) = doc.entry("tags") {
        tags.append("json").append("dom");
    }
    if let Some(limits) = doc.entry("limits") {
        limits.set("depth", 512_i64).set("ratio", 0.75);
    }

    println!("compact: {}", doc.to_json(true));
    println!("pretty:\n{}", doc.to_json(false));

    // Reads that miss are safe to chain and report the sentinel.
    println!("missing member: {}", doc["nope"][3]["deep"].is_sentinel());
}
