mod card_parser_tests;
