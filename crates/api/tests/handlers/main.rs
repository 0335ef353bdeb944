mod reference_test;
mod session_test;
mod test_utils;
mod weeks_test;
