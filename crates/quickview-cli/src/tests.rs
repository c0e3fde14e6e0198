use quickview_core::OptionSet;

use super::*;

#[test]
fn parses_show_command() {
    let cli = Cli::try_parse_from(["quickview", "show", "blue-shirt"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Show {
            ref handle,
            ref selections,
            add_to_cart: false,
        } if handle == "blue-shirt" && selections.is_empty()
    ));
}

#[test]
fn parses_repeated_selections_and_add_to_cart() {
    let cli = Cli::try_parse_from([
        "quickview",
        "show",
        "blue-shirt",
        "--select",
        "Size=Large",
        "--select",
        "Color = Navy Blue",
        "--add-to-cart",
    ])
    .expect("expected valid cli args");

    let Commands::Show {
        selections,
        add_to_cart,
        ..
    } = cli.command
    else {
        panic!("expected show command");
    };
    assert!(add_to_cart);
    assert_eq!(
        selections,
        vec![
            ("Size".to_owned(), "Large".to_owned()),
            ("Color".to_owned(), "Navy Blue".to_owned()),
        ]
    );
}

#[test]
fn rejects_selection_without_equals() {
    let result = Cli::try_parse_from(["quickview", "show", "blue-shirt", "--select", "Large"]);
    assert!(result.is_err());
}

#[test]
fn parse_selection_requires_a_name() {
    assert!(parse_selection("=Large").is_err());
    assert_eq!(
        parse_selection("Size=").expect("empty value is allowed"),
        ("Size".to_owned(), String::new())
    );
}

#[test]
fn parses_cart_command() {
    let cli = Cli::try_parse_from(["quickview", "cart"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Cart));
}

#[test]
fn parses_money_with_explicit_format() {
    let cli = Cli::try_parse_from(["quickview", "money", "-1999", "--format", "{{amount}} EUR"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Money { cents: -1999, ref format } if format == "{{amount}} EUR"
    ));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["quickview"]).is_err());
}

#[test]
fn terminal_surface_renders_fields() {
    let surface = TerminalSurface {
        title: "Blue Shirt".to_owned(),
        price: "$29.00".to_owned(),
        selectors: vec![OptionSet {
            name: "Size".to_owned(),
            values: vec!["Small".to_owned(), "Large".to_owned()],
        }],
        variant_id: Some("2".to_owned()),
        ..TerminalSurface::default()
    };

    let rendered = surface.render();

    assert!(rendered.starts_with("Blue Shirt\n"));
    assert!(rendered.contains("price:   $29.00"));
    assert!(rendered.contains("Size: Small | Large"));
    assert!(rendered.contains("variant: 2"));
    assert!(!rendered.contains("image:"));
}

#[test]
fn terminal_surface_renders_image_and_description_block() {
    let surface = TerminalSurface {
        title: "Gift Card".to_owned(),
        price: "$50.00".to_owned(),
        image: Some("//cdn.example.com/files/card_600x.png".to_owned()),
        description: Some("<p>Any amount.</p>".to_owned()),
        ..TerminalSurface::default()
    };

    assert_eq!(
        surface.render(),
        "Gift Card\n  price:   $50.00\n  image:   //cdn.example.com/files/card_600x.png\n\n<p>Any amount.</p>\n"
    );
}
