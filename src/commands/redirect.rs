//! Trailing `>` / `>>` output redirection.
//!
//! This is a convention honored by individual handlers (currently `echo`),
//! not something the dispatch loop knows about.

/// A parsed redirection target.
pub struct Redirect {
    pub target: String,
    pub append: bool,
}

/// Splits an argument list into the words before the first redirection
/// operator and the redirection itself. Anything after the target filename is
/// ignored, matching the scan-and-stop behavior of the `echo` handler.
///
/// Returns a printable diagnostic when an operator has no filename after it.
pub fn split(args: &[String]) -> Result<(Vec<String>, Option<Redirect>), String> {
    let mut words = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let append = match arg.as_str() {
            ">" => false,
            ">>" => true,
            _ => {
                words.push(arg.clone());
                continue;
            }
        };

        let target = match iter.next() {
            Some(name) => name.clone(),
            None => return Err(format!("Error: No filename specified after {}", arg)),
        };
        return Ok((words, Some(Redirect { target, append })));
    }

    Ok((words, None))
}
