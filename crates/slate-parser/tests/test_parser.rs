//! Tests for the Slate parser.

use slate_lexer::tokenize;
use slate_parser::{BinaryOperator, Expression, Statement, parse};

#[test]
fn test_parse_module_header() {
    let source = "module demo";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    assert_eq!(program.module, "demo");
    assert!(program.imports.is_empty());
    assert!(program.block.statements.is_empty());
}

#[test]
fn test_parse_imports() {
    let source = "module demo\nimport io\nimport math";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    assert_eq!(program.imports.len(), 2);
    assert_eq!(program.imports[0].name, "io");
    assert_eq!(program.imports[1].name, "math");
}

#[test]
fn test_missing_module_header() {
    let source = "import io";
    let tokens = tokenize(source).unwrap();
    assert!(parse(&tokens).is_err());
}

#[test]
fn test_empty_input() {
    let tokens = tokenize("").unwrap();
    assert!(parse(&tokens).is_err());
}

#[test]
fn test_parse_function_declaration() {
    let source = r#"
module demo

function add = |x, y| {
    return x + y
}
"#;
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    assert_eq!(program.block.statements.len(), 1);

    let Statement::Function(func) = &program.block.statements[0] else {
        panic!("Expected function declaration")
    };
    assert_eq!(func.name, "add");
    assert_eq!(func.params.len(), 2);
    assert_eq!(func.params[0].name, "x");
    assert_eq!(func.params[1].name, "y");
    assert!(func.external);
    assert_eq!(func.body.statements.len(), 1);
}

#[test]
fn test_parse_local_function() {
    let source = "module demo\nlocal function helper = |n| { return n }";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Function(func) = &program.block.statements[0] else {
        panic!("Expected function declaration")
    };
    assert_eq!(func.name, "helper");
    assert!(!func.external);
}

#[test]
fn test_parse_function_without_parameter_list() {
    let source = "module demo\nfunction ready = { return 1 }";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Function(func) = &program.block.statements[0] else {
        panic!("Expected function declaration")
    };
    assert!(func.params.is_empty());
}

#[test]
fn test_parse_parameter_annotations() {
    let source = "module demo\nfunction scale = |n: int, factor| { return n * factor }";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Function(func) = &program.block.statements[0] else {
        panic!("Expected function declaration")
    };
    assert_eq!(func.params[0].annotation.as_deref(), Some("int"));
    assert_eq!(func.params[1].annotation, None);
}

#[test]
fn test_nested_function_rejected() {
    let source = "module demo\nfunction outer = {\n function inner = { }\n}";
    let tokens = tokenize(source).unwrap();
    assert!(parse(&tokens).is_err());
}

#[test]
fn test_parse_var_declaration() {
    let source = "module demo\nvar x: int = 42";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    if let Statement::VariableDeclaration {
        name,
        annotation,
        initializer,
        ..
    } = &program.block.statements[0]
    {
        assert_eq!(name, "x");
        assert_eq!(annotation.as_deref(), Some("int"));
        assert!(matches!(
            initializer,
            Some(Expression::Integer { value: 42, .. })
        ));
    } else {
        panic!("Expected variable declaration");
    }
}

#[test]
fn test_parse_var_without_initializer() {
    let source = "module demo\nvar pending";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    if let Statement::VariableDeclaration {
        name,
        annotation,
        initializer,
        ..
    } = &program.block.statements[0]
    {
        assert_eq!(name, "pending");
        assert_eq!(annotation, &None);
        assert!(initializer.is_none());
    } else {
        panic!("Expected variable declaration");
    }
}

#[test]
fn test_parse_binary_precedence() {
    let source = "module demo\nvar x = 1 + 2 * 3";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(init),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected variable declaration")
    };

    let Expression::Binary {
        operator, right, ..
    } = init
    else {
        panic!("Expected binary expression")
    };
    assert_eq!(operator, &BinaryOperator::Add);
    assert!(matches!(
        right.as_ref(),
        Expression::Binary {
            operator: BinaryOperator::Multiply,
            ..
        }
    ));
}

#[test]
fn test_parse_left_associativity() {
    let source = "module demo\nvar x = 10 - 2 - 3";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(init),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected variable declaration")
    };

    // (10 - 2) - 3
    let Expression::Binary { left, right, .. } = init else {
        panic!("Expected binary expression")
    };
    assert!(matches!(
        left.as_ref(),
        Expression::Binary {
            operator: BinaryOperator::Subtract,
            ..
        }
    ));
    assert!(matches!(
        right.as_ref(),
        Expression::Integer { value: 3, .. }
    ));
}

#[test]
fn test_parse_grouping() {
    let source = "module demo\nvar x = (1 + 2) * 3";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(init),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected variable declaration")
    };

    let Expression::Binary { operator, left, .. } = init else {
        panic!("Expected binary expression")
    };
    assert_eq!(operator, &BinaryOperator::Multiply);
    assert!(matches!(
        left.as_ref(),
        Expression::Binary {
            operator: BinaryOperator::Add,
            ..
        }
    ));
}

#[test]
fn test_parse_comparison() {
    let source = "module demo\nvar x = 1 + 1 < 3";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(init),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected variable declaration")
    };
    assert!(matches!(
        init,
        Expression::Binary {
            operator: BinaryOperator::Less,
            ..
        }
    ));
}

#[test]
fn test_parse_assignment_expression() {
    let source = "module demo\nx = 5";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Expression { expression, .. } = &program.block.statements[0] else {
        panic!("Expected expression statement")
    };
    let Expression::Assign { target, value, .. } = expression else {
        panic!("Expected assignment")
    };
    assert_eq!(target, "x");
    assert!(matches!(
        value.as_ref(),
        Expression::Integer { value: 5, .. }
    ));
}

#[test]
fn test_parse_chained_assignment() {
    let source = "module demo\na = b = 1";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Expression { expression, .. } = &program.block.statements[0] else {
        panic!("Expected expression statement")
    };
    let Expression::Assign { target, value, .. } = expression else {
        panic!("Expected assignment")
    };
    assert_eq!(target, "a");
    assert!(matches!(value.as_ref(), Expression::Assign { .. }));
}

#[test]
fn test_equality_is_not_assignment() {
    let source = "module demo\nvar x = a == b";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(init),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected variable declaration")
    };
    assert!(matches!(
        init,
        Expression::Binary {
            operator: BinaryOperator::Equal,
            ..
        }
    ));
}

#[test]
fn test_parse_call_with_arguments() {
    let source = "module demo\nprintln(\"total\", 1 + 2)";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Expression { expression, .. } = &program.block.statements[0] else {
        panic!("Expected expression statement")
    };
    let Expression::Call {
        callee, arguments, ..
    } = expression
    else {
        panic!("Expected call expression")
    };
    assert_eq!(callee, "println");
    assert_eq!(arguments.len(), 2);
    assert!(matches!(arguments[1], Expression::Binary { .. }));
}

#[test]
fn test_only_identifiers_are_callable() {
    let source = "module demo\nvar x = 42(1)";
    let tokens = tokenize(source).unwrap();
    assert!(parse(&tokens).is_err());
}

#[test]
fn test_parse_comment_statement() {
    let source = "module demo\n# compute the total\nvar x = 1";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    assert_eq!(program.block.statements.len(), 2);
    let Statement::Comment { text, .. } = &program.block.statements[0] else {
        panic!("Expected comment statement")
    };
    assert_eq!(text, "compute the total");
}

#[test]
fn test_parse_comment_inside_function() {
    let source = "module demo\nfunction f = {\n # note\n return 1\n}";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Function(func) = &program.block.statements[0] else {
        panic!("Expected function declaration")
    };
    assert!(matches!(func.body.statements[0], Statement::Comment { .. }));
    assert!(matches!(func.body.statements[1], Statement::Return { .. }));
}

#[test]
fn test_parse_return_statement() {
    let source = "module demo\nfunction f = |n| { return n + 1 }";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Function(func) = &program.block.statements[0] else {
        panic!("Expected function declaration")
    };
    let Statement::Return { value, .. } = &func.body.statements[0] else {
        panic!("Expected return statement")
    };
    assert!(matches!(
        value,
        Expression::Binary {
            operator: BinaryOperator::Add,
            ..
        }
    ));
}

#[test]
fn test_parse_string_escapes() {
    let source = "module demo\nvar x = \"a\\nb\"";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(Expression::String { value, .. }),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected string initializer")
    };
    assert_eq!(value, "a\nb");
}

#[test]
fn test_parse_float_literal() {
    let source = "module demo\nvar x = 3.25";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::VariableDeclaration {
        initializer: Some(Expression::Float { value, .. }),
        ..
    } = &program.block.statements[0]
    else {
        panic!("Expected float initializer")
    };
    assert!((value - 3.25).abs() < f64::EPSILON);
}

#[test]
fn test_unclosed_block_is_an_error() {
    let source = "module demo\nfunction f = { return 1";
    let tokens = tokenize(source).unwrap();
    assert!(parse(&tokens).is_err());
}

#[test]
fn test_spans_cover_statements() {
    let source = "module demo\nvar x = 1";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let span = program.block.statements[0].span();
    assert_eq!(&source[span.start..span.end], "var x = 1");
}
