// tests/unit_network.rs
use coverlab_core::error::CoverlabError;
use coverlab_core::nn::{
    sigmoid, vectorize_result, Network, SgdParams, TestExample, TrainingExample,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn xor_like() -> (Vec<TrainingExample>, Vec<TestExample>) {
    // Class is the first input bit; the second bit is noise.
    let points = [([0.0, 0.0], 0), ([0.0, 1.0], 0), ([1.0, 0.0], 1), ([1.0, 1.0], 1)];
    let mut train = Vec::new();
    let mut test = Vec::new();
    for _ in 0..25 {
        for (input, label) in points {
            train.push(TrainingExample {
                input: input.to_vec(),
                target: vectorize_result(label, 2).unwrap(),
            });
        }
    }
    for (input, label) in points {
        test.push(TestExample {
            input: input.to_vec(),
            label,
        });
    }
    (train, test)
}

#[test]
fn test_shape_validation() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        Network::new(&[3], &mut rng),
        Err(CoverlabError::InvalidNetwork(_))
    ));
    assert!(Network::new(&[3, 0, 2], &mut rng).is_err());
    let net = Network::new(&[3, 4, 2], &mut rng).unwrap();
    assert_eq!(net.num_layers(), 3);
    assert!(net.feedforward(&[1.0, 2.0]).is_err());
    let out = net.feedforward(&[1.0, 0.0, 1.0]).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|a| (0.0..=1.0).contains(a)));
}

#[test]
fn test_vectorize_result_rejects_out_of_range() {
    assert_eq!(vectorize_result(1, 2).unwrap(), vec![0.0, 1.0]);
    assert!(matches!(
        vectorize_result(2, 2),
        Err(CoverlabError::InvalidLabel { label: 2, classes: 2 })
    ));
}

#[test]
fn test_sigmoid_midpoint() {
    assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
}

#[test]
fn test_training_learns_separable_data() {
    let mut rng = StdRng::seed_from_u64(7);
    let (mut train, test) = xor_like();
    let mut net = Network::new(&[2, 4, 2], &mut rng).unwrap();
    let params = SgdParams {
        epochs: 60,
        mini_batch_size: 10,
        eta: 3.0,
    };
    let mut epochs_seen = 0;
    let history = net
        .sgd(&mut train, &params, Some(&test), &mut rng, |_| epochs_seen += 1)
        .unwrap();
    assert_eq!(epochs_seen, 60);
    assert_eq!(history.cost.len(), 60);
    assert_eq!(history.accuracy.len(), 60);
    assert!(history.cost[59] < history.cost[0]);
    assert!(history.final_accuracy().unwrap() >= 0.75);
}

#[test]
fn test_sgd_rejects_bad_parameters() {
    let mut rng = StdRng::seed_from_u64(8);
    let (mut train, _) = xor_like();
    let mut net = Network::new(&[2, 2], &mut rng).unwrap();
    let params = SgdParams {
        epochs: 1,
        mini_batch_size: 0,
        eta: 1.0,
    };
    assert!(net.sgd(&mut train, &params, None, &mut rng, |_| {}).is_err());
    let params = SgdParams {
        mini_batch_size: 5,
        ..params
    };
    assert!(net.sgd(&mut [], &params, None, &mut rng, |_| {}).is_err());
}
