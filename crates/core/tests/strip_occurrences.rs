use purge_core::strip::{StripError, Stripper, TARGET_FUNCTION};

fn stripper() -> Stripper {
    Stripper::new(TARGET_FUNCTION).expect("compile stripper")
}

#[test]
fn strips_single_function_to_signature_and_final_return() {
    let source = "def compute_rewards(a, b):\n    x = a + b\n    y = x * 2\n    return y";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(result.content, "def compute_rewards(a, b):\n    \n    return y");
}

#[test]
fn preserves_surrounding_code_byte_for_byte() {
    let source = "import torch\n\n\ndef compute_rewards(obs):\n    total = obs.sum()\n    return total\n\n\ndef unrelated():\n    return 1\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(
        result.content,
        "import torch\n\n\ndef compute_rewards(obs):\n    \n    return total\n\n\ndef unrelated():\n    return 1\n"
    );
}

#[test]
fn keeps_decorator_line_above_the_header() {
    let source = "@torch.jit.script\ndef compute_rewards(x):\n    y = x * x\n    return y\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(result.content, "@torch.jit.script\ndef compute_rewards(x):\n    \n    return y\n");
}

#[test]
fn matches_multiline_parameter_lists_with_nested_parens() {
    let source = "def compute_rewards(\n    obs,\n    scale=(1.0, 2.0),\n) -> float:\n    r = obs * scale[0]\n    return r\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(
        result.content,
        "def compute_rewards(\n    obs,\n    scale=(1.0, 2.0),\n) -> float:\n    \n    return r\n"
    );
}

#[test]
fn strips_two_independent_occurrences() {
    let source = "def compute_rewards(a):\n    x = 1\n    return x\n\nCONST = 5\n\ndef compute_rewards(b):\n    y = 2\n    return y\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(
        result.content,
        "def compute_rewards(a):\n    \n    return x\n\nCONST = 5\n\ndef compute_rewards(b):\n    \n    return y\n"
    );
}

#[test]
fn keeps_only_the_last_return_before_the_next_top_level_construct() {
    let source = "def compute_rewards(x):\n    if x > 0:\n        return x\n    return 0\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(result.content, "def compute_rewards(x):\n    \n    return 0\n");
}

#[test]
fn function_without_return_is_left_alone() {
    let source = "def compute_rewards(x):\n    pass\n";
    let result = stripper().strip(source).expect("strip");

    assert!(!result.changed);
    assert_eq!(result.content, source);
}

#[test]
fn call_sites_without_a_definition_are_rejected_fast() {
    let source = "rewards = compute_rewards(obs, actions)\n";
    let result = stripper().strip(source).expect("strip");

    assert!(!result.changed);
    assert_eq!(result.content, source);
}

#[test]
fn stripping_twice_changes_nothing_the_second_time() {
    let source = "def compute_rewards(a, b):\n    x = a + b\n    y = x * 2\n    return y\n";
    let first = stripper().strip(source).expect("first strip");
    assert!(first.changed);

    let second = stripper().strip(&first.content).expect("second strip");
    assert!(!second.changed);
    assert_eq!(second.content, first.content);
}

#[test]
fn strips_indented_method_definitions() {
    let source = "class RewardModel:\n    def compute_rewards(self, obs):\n        r = obs * 2\n        return r\n\nprint(1)\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(
        result.content,
        "class RewardModel:\n    def compute_rewards(self, obs):\n        \n        return r\n\nprint(1)\n"
    );
}

#[test]
fn bare_return_counts_as_the_final_return() {
    let source = "def compute_rewards(buf):\n    buf.clear()\n    return\n";
    let result = stripper().strip(source).expect("strip");

    assert!(result.changed);
    assert_eq!(result.content, "def compute_rewards(buf):\n    \n    return\n");
}

#[test]
fn nested_definitions_are_rejected() {
    let source = "def compute_rewards(a):\n    def compute_rewards(b):\n        return b\n    return a\n";
    let err = stripper().strip(source).expect_err("nested must error");

    assert!(matches!(err, StripError::NestedOccurrence { .. }));
}

#[test]
fn unterminated_parameter_list_is_an_error() {
    let source = "def compute_rewards(a,\n";
    let err = stripper().strip(source).expect_err("unterminated must error");

    assert!(matches!(err, StripError::UnterminatedParams { .. }));
}

// The two tests below pin the documented limitation of depth counting:
// parentheses inside string-literal defaults are treated as structural.

#[test]
fn paren_inside_string_default_is_silently_skipped() {
    let source = "def compute_rewards(sep=\")\"):\n    x = 1\n    return x\n";
    let result = stripper().strip(source).expect("strip");

    // The string's parenthesis closes the parameter list early and no header
    // colon follows it, so the occurrence is not recognized at all.
    assert!(!result.changed);
    assert_eq!(result.content, source);
}

#[test]
fn paren_and_colon_inside_string_default_truncate_the_header() {
    let source = "def compute_rewards(sep=\"):\"):\n    x = 1\n    return x\n";
    let result = stripper().strip(source).expect("strip");

    // The string's parenthesis and colon are taken as the end of the header,
    // so the rewritten signature is cut short inside the default value.
    assert!(result.changed);
    assert_eq!(result.content, "def compute_rewards(sep=\"):\n    \n    return x\n");
}

#[test]
fn find_next_reports_offsets_and_captures() {
    let source = "x = 1\n@jit\ndef compute_rewards(a) -> int:\n    b = a\n    return b\n";
    let stripper = stripper();

    let occ = stripper.find_next(source, 0).expect("find").expect("occurrence");
    assert_eq!(occ.start, 6);
    assert_eq!(occ.decorator, Some("@jit"));
    assert_eq!(occ.header, "def compute_rewards(a) -> int:");
    assert_eq!(occ.body, "\n    b = a\n");
    assert_eq!(occ.ret, "return b");
    assert_eq!(occ.ret_indent, "    ");
    assert_eq!(
        &source[occ.start..occ.end],
        "@jit\ndef compute_rewards(a) -> int:\n    b = a\n    return b"
    );

    let after = stripper.find_next(source, occ.end).expect("find again");
    assert!(after.is_none());
}

#[test]
fn other_function_names_are_untouched() {
    let source = "def compute_rewards_v2(a):\n    x = 1\n    return x\n";
    let stripper = Stripper::new(TARGET_FUNCTION).expect("stripper");
    let result = stripper.strip(source).expect("strip");

    assert!(!result.changed);
}
