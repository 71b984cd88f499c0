mod openai_vision_client_test;
