mod reservation_tests;
mod summary_tests;
