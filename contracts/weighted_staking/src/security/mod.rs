mod test_arithmetic;
