use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = "#5aa469".parse().unwrap();
    assert_eq!(c, Rgba8::rgb(0x5a, 0xa4, 0x69));

    let c = Rgba8::from_hex("D35D6E80").unwrap();
    assert_eq!(c, Rgba8::rgba(0xd3, 0x5d, 0x6e, 0x80));
}

#[test]
fn rejects_bad_hex() {
    assert!("#12345".parse::<Rgba8>().is_err());
    assert!("#zzzzzz".parse::<Rgba8>().is_err());
    assert!("".parse::<Rgba8>().is_err());
}

#[test]
fn display_round_trips_through_parse() {
    for c in [Rgba8::rgb(1, 2, 3), Rgba8::rgba(250, 128, 0, 7)] {
        assert_eq!(c.to_string().parse::<Rgba8>().unwrap(), c);
    }
}

#[test]
fn premul_scales_channels_by_alpha() {
    assert_eq!(Rgba8::rgb(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::rgba(255, 128, 0, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::rgba(255, 255, 255, 128).to_premul(), [128, 128, 128, 128]);
}
