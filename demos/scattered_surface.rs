use idwrust::{evaluation::Evaluation, idw::InverseDistanceWeighting, norm::DistanceNorm, options::IdwOptions, sample::Sample};

fn surface_example()
{
    // Franke-like surface sampled at scattered locations, two values per node.
    let f = |x: &[f64]| [libm::exp(-(x[0] - 0.3).powi(2) - (x[1] - 0.6).powi(2)), x[0] * x[1]];
    let mut input = Sample::new(2);
    let mut output = Sample::new(2);
    for i in 0..200
    {
        let t = i as f64;
        let x = [(t * 0.618_033_988_7).fract(), (t * 0.754_877_666_2).fract()];
        input.push(&x).unwrap();
        output.push(&f(&x)).unwrap();
    }

    let options = IdwOptions::default().with_p(3.0).with_neighbour_count(12).with_norm(DistanceNorm::Euclidean);
    let idw = InverseDistanceWeighting::with_options(input, output, options).unwrap();
    println!("{idw}");

    let mut points = Sample::new(2);
    for i in 0..5
    {
        points.push(&[0.1 + 0.2 * i as f64, 0.5]).unwrap();
    }
    let values = idw.evaluate_batch(&points).unwrap();
    for (x, y) in points.rows().zip(values.rows())
    {
        let exact = f(x);
        println!("f({:.2}, {:.2}) = [{:.4}, {:.4}], exact = [{:.4}, {:.4}]", x[0], x[1], y[0], y[1], exact[0], exact[1]);
    }
}

fn main()
{
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
    surface_example();
}
