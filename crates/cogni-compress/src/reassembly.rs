//! Reassembly (spec §4.8 step 9): join kept, rewritten sentences back into
//! prose and restore extracted code blocks.

use crate::code_blocks::restore_code_blocks;

/// Join `sentences` with single spaces and restore code placeholders using
/// `blocks` (as returned by [`crate::code_blocks::extract_code_blocks`]).
#[must_use]
pub fn reassemble(sentences: &[String], blocks: &[String]) -> String {
    let joined = sentences.join(" ");
    restore_code_blocks(&joined, blocks)
}
