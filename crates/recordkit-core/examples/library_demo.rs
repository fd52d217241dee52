//! Library records demo
//!
//! This example walks two revisions of a library member through:
//! - Structural diff with keyed correlation, redaction and display mapping
//! - Structural merge with per-field resolvers
//! - Simplify with dropped fields
//! - Loading the same options from a TOML document

use recordkit_core::logging_facility::{init, Profile};
use recordkit_core::{
    diff, merge, simplify, DiffOptions, EnumDescriptor, MergeOptions, MessageDescriptor,
    OptionsConfig, Record, Resolver, ScalarType, Side, SimplifyOptions, Value, ValueMapper,
};
use std::sync::Arc;

const CONFIG: &str = r#"
[diff]
redact = ["Member.email"]

[diff.correlate_by]
"Member.borrow_history" = "Book.book_id"

[merge.resolvers]
"Book.copies" = "greater"

[merge.merge_by]
"Member.borrow_history" = "Book.book_id"

[simplify]
drop = ["Address.country"]
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  RecordKit - Library Records Demo                        ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    let status = Arc::new(EnumDescriptor::new(
        "library.BookStatus",
        [("AVAILABLE", 0), ("BORROWED", 1), ("RESERVED", 2)],
    ));
    let address = MessageDescriptor::builder("library.Address")
        .scalar("street", ScalarType::String)
        .scalar("city", ScalarType::String)
        .scalar("country", ScalarType::String)
        .build();
    let book = MessageDescriptor::builder("library.Book")
        .scalar("book_id", ScalarType::I32)
        .scalar("title", ScalarType::String)
        .scalar("copies", ScalarType::I32)
        .enumeration("status", &status)
        .build();
    let member = MessageDescriptor::builder("library.Member")
        .scalar("member_id", ScalarType::I32)
        .scalar("name", ScalarType::String)
        .scalar("email", ScalarType::String)
        .message("address", "library.Address")
        .repeated_message("borrow_history", "library.Book")
        .build();

    let borrowed = status
        .value_by_name("BORROWED")
        .ok_or("missing BORROWED constant")?;
    let dune = Record::new(book.clone())
        .with("book_id", 1)?
        .with("title", "Dune")?
        .with("copies", 2)?;
    let emma = Record::new(book.clone())
        .with("book_id", 2)?
        .with("title", "Emma")?;

    let before = Record::new(member.clone())
        .with("member_id", 7)?
        .with("name", "Ada")?
        .with("email", "ada@example.org")?
        .with(
            "address",
            Record::new(address.clone())
                .with("city", "Boston")?
                .with("country", "US")?,
        )?
        .with(
            "borrow_history",
            Value::List(vec![dune.clone().into(), emma.clone().into()]),
        )?;
    let after = before
        .clone()
        .with("email", "ada@library.org")?
        .with(
            "borrow_history",
            Value::List(vec![
                emma.into(),
                dune.with("copies", 5)?.with("status", borrowed)?.into(),
            ]),
        )?;

    // ═══════════════════════════════════════════════════════════
    // SECTION 1: Diff
    // ═══════════════════════════════════════════════════════════
    println!("🔍 SECTION 1: Diff\n");

    let mapper = ValueMapper::builder()
        .map("Book.copies", |value: &Value, _side: Side| match value {
            Value::I32(n) if *n > 1 => Value::from("several"),
            _ => Value::from("single"),
        })
        .build()?;
    let diff_options = DiffOptions::builder()
        .correlate_by_field("Member.borrow_history", "Book.book_id")
        .redact("Member.email")
        .mapper(mapper)
        .build()?;
    println!("{}", diff(Some(&before), Some(&after), Some(&diff_options))?);

    // ═══════════════════════════════════════════════════════════
    // SECTION 2: Merge
    // ═══════════════════════════════════════════════════════════
    println!("🔀 SECTION 2: Merge\n");

    let merge_options = MergeOptions::builder()
        .resolver("Member.email", Resolver::Second)
        .resolver("Book.copies", Resolver::Greater)
        .merge_by_field("Member.borrow_history", "Book.book_id")
        .build()?;
    let (left, right) = merge(&before, &after, Some(&merge_options))?;
    println!("✓ Converged: {}", left == right);
    println!("  {}\n", left);

    // ═══════════════════════════════════════════════════════════
    // SECTION 3: Simplify
    // ═══════════════════════════════════════════════════════════
    println!("🧹 SECTION 3: Simplify\n");

    let simplify_options = SimplifyOptions::builder()
        .drop_field("Address.country")
        .build()?;
    let simplified = simplify(&left.with("member_id", 0)?, Some(&simplify_options))?;
    println!("  {}\n", simplified);

    // ═══════════════════════════════════════════════════════════
    // SECTION 4: Options from TOML
    // ═══════════════════════════════════════════════════════════
    println!("📄 SECTION 4: Options from TOML\n");

    let config = OptionsConfig::from_toml_str(CONFIG)?;
    let report = diff(Some(&before), Some(&after), Some(&config.diff_options()?))?;
    let (merged, _) = merge(&before, &after, Some(&config.merge_options()?))?;
    let trimmed = simplify(&merged, Some(&config.simplify_options()?))?;
    println!("{}", report);
    println!("  {}", trimmed);

    Ok(())
}
