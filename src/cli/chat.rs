use std::io::Write;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::core::AppConfig;
use crate::session::{Session, StreamEvent, SubmitError};

pub async fn run(config: &AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");
    let mut session = Session::new(config);

    if let Some(greeting) = session.state().messages().first() {
        println!("{}", greeting.text);
    }

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                match session.submit(&line) {
                    Ok(()) => {}
                    Err(SubmitError::EmptyInput) => {
                        println!("Please provide a question");
                        continue;
                    }
                    Err(SubmitError::TurnInProgress) => {
                        println!("Waiting for response...");
                        continue;
                    }
                }

                // Print each token as it is applied to the session
                while let Some(event) = session.next_event().await {
                    match event {
                        StreamEvent::Token(fragment) => {
                            print!("{}", fragment);
                            std::io::stdout().flush()?;
                        }
                        StreamEvent::Done => println!(),
                        StreamEvent::SourceDocs(_) => {}
                    }
                }

                if let Some(err) = session.state().last_error() {
                    eprintln!("Error: {}", err);
                    session.clear_error();
                    continue;
                }

                // Render the sources attached to the committed answer
                if let Some(answer) = session.state().messages().last() {
                    if let Some(docs) = &answer.source_documents {
                        for (index, doc) in docs.iter().enumerate() {
                            println!("\nSource {}", index + 1);
                            println!("{}", doc.content);
                            if let Some(page) = doc.page_number() {
                                println!("Page Number: {}", page);
                            } else if let Some(source) = doc.source() {
                                println!("Source: {}", source);
                            }
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                session.cancel();
                break;
            }
            Err(ReadlineError::Eof) => {
                session.cancel();
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
