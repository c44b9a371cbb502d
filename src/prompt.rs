//! Interactive prompts for a new catalog entry.
//!
//! Each field has a typed prompt; invalid input is rejected and the question
//! is asked again.

use crate::book;

use dialoguer::Input;

/// Reject answers that are empty or only whitespace.
///
/// Accepted answers are stored exactly as typed.
#[allow(clippy::ptr_arg)]
pub fn non_empty(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("a non-empty answer is required")
    } else {
        Ok(())
    }
}

fn ask_text(prompt: &str) -> dialoguer::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .validate_with(non_empty)
        .interact_text()
}

/// Ask for the id, title, author and publisher of a book.
///
/// The location is not asked for and stays empty.
pub fn ask_book() -> dialoguer::Result<book::BookRecord> {
    let id: i64 = Input::new()
        .with_prompt("What is the id of the book?")
        .interact_text()?;
    let title = ask_text("What is the title of the book?")?;
    let author = ask_text("Who is the author of the book?")?;
    let publisher = ask_text("Who is the publisher of the book?")?;
    Ok(book::BookRecord::new(id, title, author, publisher))
}
