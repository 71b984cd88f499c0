mod case_identifier_test;
