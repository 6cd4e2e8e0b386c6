use bigint_words::{BigIntError, JsBigInt};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

#[test]
fn literal_parses_into_words() {
    let r = "0xffffffffffffffff_ffffffffffffffff".replace('_', "").parse::<JsBigInt>();
    match r {
        Ok(v) => assert_eq!(v.magnitude(), &[u64::MAX, u64::MAX]),
        other => panic!("expected BigInt, got {:?}", other),
    }

    let r = "-12345678901234567890123456789n".parse::<JsBigInt>();
    match r {
        Ok(v) => {
            assert!(v.is_negative());
            assert_eq!(v.to_string(), "-12345678901234567890123456789");
        }
        other => panic!("expected BigInt, got {:?}", other),
    }
}

#[test]
fn blank_literal_is_zero() {
    assert_eq!("".parse::<JsBigInt>(), Ok(JsBigInt::zero()));
    assert_eq!("   \t".parse::<JsBigInt>(), Ok(JsBigInt::zero()));
}

#[test]
fn invalid_literal_reports_syntax_error() {
    let r = "123abc".parse::<JsBigInt>();
    match r {
        Err(err @ BigIntError::SyntaxError { .. }) => {
            assert_eq!(err.message(), "Cannot convert 123abc to a BigInt");
            assert_eq!(err.user_message(), "SyntaxError: Cannot convert 123abc to a BigInt");
        }
        other => panic!("expected SyntaxError, got {:?}", other),
    }
}

#[test]
fn display_radix_round_trip() {
    let v = JsBigInt::from_i64(-255).shift_left(64);
    let hex = v.to_str_radix(16).unwrap();
    assert_eq!(hex, "-ff0000000000000000");
    let back: JsBigInt = format!("-{}", u128::from_str_radix(&hex[1..], 16).unwrap()).parse().unwrap();
    assert_eq!(back, v);
}
