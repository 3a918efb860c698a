/*!
# IO utilities

JSON loading/saving for corpus files.
!*/
pub mod json;
