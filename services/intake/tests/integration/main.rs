mod helpers;

mod user_test;
