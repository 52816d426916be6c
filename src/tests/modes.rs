#[cfg(test)]
mod modes_tests {
    use crate::{
        config::HalftoneConfig,
        dithering::{
            Mode,
            threshold::{apply_threshold, ordered::OrderedDithering},
        },
        error::HalftoneError,
        prelude::*,
        run,
        tests::utils::*,
    };

    fn run_mode(mode: Mode, config: &HalftoneConfig, input: &Texture<f64>) -> Texture<f64> {
        run(config, mode, input.as_texture_slice()).unwrap()
    }

    fn seeded() -> HalftoneConfig {
        HalftoneConfig {
            seed: Some(17),
            ..HalftoneConfig::default()
        }
    }

    #[test]
    fn test_output_shapes() {
        let input = gen_random_map(TEST_SIZE, TEST_SIZE / 2, 1);
        let (width, height) = input.shape_2d();
        let config = seeded();

        for mode in Mode::ALL {
            let output = run_mode(mode, &config, &input);
            let expected = match mode.error_diffusion() {
                Some(_) => (width + 2, height + 1, 1),
                None => (width, height, 1),
            };
            assert_eq!(output.shape(), expected, "{}", mode);
        }
    }

    #[test]
    fn test_crop_border_restores_shape() {
        let input = gen_random_map(TEST_SIZE, TEST_SIZE / 2, 2);
        let config = HalftoneConfig {
            crop_border: true,
            ..seeded()
        };
        for mode in Mode::ALL {
            let output = run_mode(mode, &config, &input);
            assert_eq!(output.shape(), input.shape(), "{}", mode);
        }
    }

    #[test]
    fn test_halftone_modes_are_binary() {
        let input = gen_gradient(TEST_SIZE, TEST_SIZE);
        let config = HalftoneConfig {
            crop_border: true,
            ..seeded()
        };
        for mode in Mode::ALL.into_iter().filter(|m| *m != Mode::ToGrayscale) {
            let output = run_mode(mode, &config, &input);
            assert!(is_binary(output.as_ref(), 255.0), "{} is not binary", mode);
        }
    }

    #[test]
    fn test_to_grayscale_weights() {
        let input = Texture::from_slice(2, 1, 3, &[100.0, 100.0, 100.0, 10.0, 20.0, 30.0]);
        let output = run_mode(Mode::ToGrayscale, &HalftoneConfig::default(), &input);
        assert_eq!(output.shape(), (2, 1, 1));
        assert!((output[(0, 0)] - 100.0).abs() < 1e-9);
        assert!((output[(1, 0)] - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_input_is_reduced_first() {
        let rgb = gen_random_rgb(TEST_SIZE, TEST_SIZE, 3);
        let config = HalftoneConfig::default();

        let gray = run_mode(Mode::ToGrayscale, &config, &rgb);
        let expected = apply_threshold(gray.as_texture_slice(), 128.0, 255.0).unwrap();
        assert_eq!(run_mode(Mode::Thresholding, &config, &rgb), expected);
    }

    #[test]
    fn test_custom_grayscale_weights() {
        let input = Texture::from_slice(1, 1, 3, &[200.0, 0.0, 0.0]);
        let red = HalftoneConfig {
            grayscale_weights: [1.0, 0.0, 0.0],
            ..HalftoneConfig::default()
        };
        assert_eq!(run_mode(Mode::Thresholding, &red, &input).as_ref(), &[255.0]);
        assert_eq!(
            run_mode(Mode::Thresholding, &HalftoneConfig::default(), &input).as_ref(),
            &[0.0]
        );
    }

    #[test]
    fn test_gamma_is_applied_before_halftoning() {
        let input = Texture::from_rows(&[[150.0, 200.0]]).unwrap();
        let plain = run_mode(Mode::Thresholding, &HalftoneConfig::default(), &input);
        assert_eq!(plain.as_ref(), &[255.0, 255.0]);

        let config = HalftoneConfig {
            gamma: 2.0,
            ..HalftoneConfig::default()
        };
        // 200 * (150 / 200)^2 = 112.5
        let corrected = run_mode(Mode::Thresholding, &config, &input);
        assert_eq!(corrected.as_ref(), &[0.0, 255.0]);
    }

    #[test]
    fn test_seeded_random_dithering() {
        let input = gen_gradient(TEST_SIZE, TEST_SIZE);
        let a = run_mode(Mode::RandomDithering, &seeded(), &input);
        let b = run_mode(Mode::RandomDithering, &seeded(), &input);
        assert_eq!(a, b);

        let other = HalftoneConfig {
            seed: Some(18),
            ..HalftoneConfig::default()
        };
        assert_ne!(a, run_mode(Mode::RandomDithering, &other, &input));
    }

    #[test]
    fn test_ordered_dithering_uses_raw_ranks() {
        let input = gen_random_map(TEST_SIZE, TEST_SIZE, 4);
        let config = HalftoneConfig {
            box_size: 4,
            ..HalftoneConfig::default()
        };
        let output = run_mode(Mode::OrderedDithering, &config, &input);
        let expected = OrderedDithering::new(4, 255.0)
            .once(input.as_texture_slice())
            .unwrap();
        assert_eq!(output, expected);

        // ranks of a 4x4 matrix stop at 15, so anything brighter is white
        let bright = input.map(|v| v.max(16.0));
        let output = run_mode(Mode::OrderedDithering, &config, &bright);
        assert!(output.as_ref().iter().all(|v| *v == 255.0));
    }

    #[test]
    fn test_ordered_dithering_with_non_power_of_two_box() {
        let input = gen_random_map(10, 7, 6);
        let config = HalftoneConfig {
            box_size: 6,
            ..HalftoneConfig::default()
        };
        let output = run_mode(Mode::OrderedDithering, &config, &input);
        assert_eq!(output.shape(), (10, 7, 1));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let input = gen_random_map(4, 4, 0);
        let config = HalftoneConfig {
            max_intensity: 0.0,
            ..HalftoneConfig::default()
        };
        let result = run(&config, Mode::FloydSteinberg, input.as_texture_slice());
        assert!(matches!(result, Err(HalftoneError::Config(_))));
    }

    #[test]
    fn test_unsupported_planes() {
        let input = Texture::<f64>::new(2, 2, 2);
        let result = run(
            &HalftoneConfig::default(),
            Mode::Thresholding,
            input.as_texture_slice(),
        );
        assert!(matches!(result, Err(HalftoneError::UnsupportedPlanes(2))));
    }
}
