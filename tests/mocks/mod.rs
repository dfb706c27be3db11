pub mod scorer_mock;
