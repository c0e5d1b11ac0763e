mod html_extraction_tests;
mod text_tests;
