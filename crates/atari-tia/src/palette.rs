//! NTSC colour palette.
//!
//! 128 colours as ARGB32. A colour register holds hue in the high nibble
//! and luminance in bits 1-3; bit 0 is ignored, so the index is `colour >> 1`.

/// NTSC palette indexed by `colour >> 1`.
#[rustfmt::skip]
pub const PALETTE: [u32; 128] = [
    // $0x: grey
    0xFF00_0000, 0xFF4A_4A4A, 0xFF6F_6F6F, 0xFF8E_8E8E, 0xFFAA_AAAA, 0xFFC0_C0C0, 0xFFD6_D6D6, 0xFFEC_ECEC,
    // $1x: gold
    0xFF48_4800, 0xFF69_690F, 0xFF86_861D, 0xFFA2_A22A, 0xFFBB_BB35, 0xFFD2_D240, 0xFFE8_E84A, 0xFFFC_FC54,
    // $2x: orange
    0xFF7C_2C00, 0xFF90_4811, 0xFFA2_6221, 0xFFB4_7A30, 0xFFC3_903D, 0xFFD2_A44A, 0xFFDF_B755, 0xFFEC_C860,
    // $3x: red-orange
    0xFF90_1C00, 0xFFA3_3915, 0xFFB5_5328, 0xFFC6_6C3A, 0xFFD5_824A, 0xFFE3_9759, 0xFFF0_AA67, 0xFFFC_BC74,
    // $4x: red
    0xFF94_0000, 0xFFA7_1A1A, 0xFFB8_3232, 0xFFC8_4848, 0xFFD6_5C5C, 0xFFE4_6F6F, 0xFFF0_8080, 0xFFFC_9090,
    // $5x: purple
    0xFF84_0064, 0xFF97_197A, 0xFFA8_308F, 0xFFB8_46A2, 0xFFC6_59B3, 0xFFD4_6CC3, 0xFFE0_7CD2, 0xFFEC_8CE0,
    // $6x: violet
    0xFF50_0084, 0xFF68_199A, 0xFF7D_30AD, 0xFF92_46C0, 0xFFA4_59D0, 0xFFB5_6CE0, 0xFFC5_7CEE, 0xFFD4_8CFC,
    // $7x: indigo
    0xFF14_0090, 0xFF33_1AA3, 0xFF4E_32B5, 0xFF68_48C6, 0xFF7F_5CD5, 0xFF95_6FE3, 0xFFA9_80F0, 0xFFBC_90FC,
    // $8x: blue
    0xFF00_0094, 0xFF18_1AA7, 0xFF2D_32B8, 0xFF42_48C8, 0xFF54_5CD6, 0xFF65_6FE4, 0xFF75_80F0, 0xFF84_90FC,
    // $9x: cobalt
    0xFF00_1C88, 0xFF18_3B9D, 0xFF2D_57B0, 0xFF42_72C2, 0xFF54_8AD2, 0xFF65_A0E1, 0xFF75_B5EF, 0xFF84_C8FC,
    // $Ax: cyan-blue
    0xFF00_3064, 0xFF18_5080, 0xFF2D_6D98, 0xFF42_88B0, 0xFF54_A0C5, 0xFF65_B7D9, 0xFF75_CCEB, 0xFF84_E0FC,
    // $Bx: teal
    0xFF00_4030, 0xFF18_624E, 0xFF2D_8169, 0xFF42_9E82, 0xFF54_B899, 0xFF65_D1AE, 0xFF75_E7C2, 0xFF84_FCD4,
    // $Cx: green
    0xFF00_4400, 0xFF1A_661A, 0xFF32_8432, 0xFF48_A048, 0xFF5C_BA5C, 0xFF6F_D26F, 0xFF80_E880, 0xFF90_FC90,
    // $Dx: yellow-green
    0xFF14_3C00, 0xFF35_5F18, 0xFF52_7E2D, 0xFF6E_9C42, 0xFF87_B754, 0xFF9E_D065, 0xFFB4_E775, 0xFFC8_FC84,
    // $Ex: olive
    0xFF30_3800, 0xFF50_5916, 0xFF6D_762B, 0xFF88_923E, 0xFFA0_AB4F, 0xFFB7_C25F, 0xFFCC_D86E, 0xFFE0_EC7C,
    // $Fx: brown
    0xFF48_2C00, 0xFF69_4D14, 0xFF86_6A26, 0xFFA2_8638, 0xFFBB_9F47, 0xFFD2_B656, 0xFFE8_CC63, 0xFFFC_E070,
];

/// ARGB32 value for a colour register value.
#[must_use]
pub fn argb(colour: u8) -> u32 {
    PALETTE[usize::from(colour >> 1)]
}
